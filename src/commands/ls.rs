//! `ls`: print one page of an entity list

use serde_json::json;
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::cli::OutputOptions;
use crate::commands::print_json;
use crate::config::Config;
use crate::entity::{Client, Document, EntityKind, Invoice, Partner, Project, Record};
use crate::error::Result;
use crate::list::coordinator::CoordinatorOptions;
use crate::list::pagination::page_label;
use crate::list::query::{ListResult, QueryKey, SortSpec, total_page_count};
use crate::list::table::validate_sort_key;
use crate::source::demo::{DemoData, demo_source};
use crate::source::{HttpSource, ListSource};

/// Query flags of `ls`
#[derive(Debug, Clone, Default)]
pub struct LsOptions {
    pub search: Option<String>,
    pub page: u32,
    /// Defaults to the configured page size
    pub size: Option<u32>,
    /// Defaults to the entity's default sort
    pub sort: Option<String>,
    pub desc: bool,
    /// Read the seeded in-memory data instead of the remote store
    pub demo: bool,
}

/// List one page of `kind`
pub async fn cmd_ls(kind: EntityKind, options: LsOptions, output: OutputOptions) -> Result<()> {
    let config = Config::load()?;
    match kind {
        EntityKind::Clients => ls_entity::<Client>(&config, &options, output).await,
        EntityKind::Projects => ls_entity::<Project>(&config, &options, output).await,
        EntityKind::Partners => ls_entity::<Partner>(&config, &options, output).await,
        EntityKind::Invoices => ls_entity::<Invoice>(&config, &options, output).await,
        EntityKind::Documents => ls_entity::<Document>(&config, &options, output).await,
    }
}

async fn ls_entity<T: DemoData>(config: &Config, options: &LsOptions, output: OutputOptions) -> Result<()> {
    let key = resolve_query::<T>(&config.coordinator_options(T::default_sort())?, options)?;
    let request = key.to_request();
    let kind = T::KIND;
    tracing::debug!(entity = %kind, ?request, "ls");

    let result = if options.demo {
        demo_source::<T>().list(&request).await?
    } else {
        HttpSource::<T>::from_config(config)?.list(&request).await?
    };

    let page_count = total_page_count(result.total, key.size);
    let footer = format!("{} (total {})", page_label(key.page, page_count), result.total);

    if output.json {
        return print_json(&json!({
            "entity": kind.as_str(),
            "page": key.page,
            "size": key.size,
            "page_count": page_count,
            "total": result.total,
            "items": result.items,
        }));
    }

    if result.items.is_empty() {
        println!("No {kind} found");
    } else {
        println!("{}", render_table(&result));
    }
    println!("{footer}");
    Ok(())
}

/// Turn `ls` flags into a validated query key.
///
/// The page size must be in the configured allow-list and the sort key must
/// name a sortable column. Page 0 is read as page 1.
pub fn resolve_query<T: Record>(options: &CoordinatorOptions, flags: &LsOptions) -> Result<QueryKey> {
    let size = match flags.size {
        Some(size) => options.page_sizes.validate(size)?,
        None => options.page_size,
    };

    let sort = match &flags.sort {
        Some(key) => {
            validate_sort_key(&T::columns(), key)?;
            SortSpec::new(key.clone(), flags.desc)
        }
        None => {
            let default = options.sort.clone();
            SortSpec::new(default.key, default.descending || flags.desc)
        }
    };

    let search = flags.search.as_deref().unwrap_or("");
    Ok(QueryKey::new(flags.page.max(1), size, &sort, search))
}

/// Table of the visible columns of a result page
pub fn render_table<T: Record>(result: &ListResult<T>) -> String {
    let hidden = T::invisible_columns();
    let columns: Vec<_> = T::columns()
        .into_iter()
        .filter(|c| !hidden.contains(&c.key))
        .collect();

    let mut builder = Builder::default();
    builder.push_record(columns.iter().map(|c| c.title.to_string()));
    for item in &result.items {
        builder.push_record(columns.iter().map(|c| (c.render)(item).text));
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}
