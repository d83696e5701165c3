use cudyn_driver::symbols::{Platform, SymbolGroup, SymbolSpec, SYMBOL_TABLE};
use cudyn_driver::{CudaDriver, SymbolStatus};
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Serialize)]
struct SymbolRow {
    name: &'static str,
    group: &'static str,
    lookup: String,
    required: bool,
    windows_only: bool,
    /// `None` when the driver could not be loaded.
    status: Option<&'static str>,
}

pub fn run_symbols(group: Option<&str>, json: bool) -> anyhow::Result<()> {
    let group = match group {
        Some(label) => Some(SymbolGroup::from_label(label).ok_or_else(|| {
            anyhow::anyhow!(
                "unknown symbol group '{}', expected one of: {}",
                label,
                SymbolGroup::ALL.map(SymbolGroup::label).join(", ")
            )
        })?),
        None => None,
    };

    let driver = match CudaDriver::get() {
        Ok(driver) => Some(driver),
        Err(e) => {
            warn!("{}; showing the table without resolution status", e);
            None
        }
    };

    let rows: Vec<SymbolRow> = SYMBOL_TABLE
        .iter()
        .filter(|spec| group.map_or(true, |g| spec.group == g))
        .map(|spec| row(spec, driver.as_deref()))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        print_rows(&rows);
    }
    Ok(())
}

fn row(spec: &'static SymbolSpec, driver: Option<&CudaDriver>) -> SymbolRow {
    let status = driver.map(|d| match d.symbols().get(spec.name).map(|s| s.status()) {
        Some(SymbolStatus::Bound) => "bound",
        Some(SymbolStatus::Missing) => "missing",
        Some(SymbolStatus::Skipped) | None => "skipped",
    });

    SymbolRow {
        name: spec.name,
        group: spec.group.label(),
        lookup: spec.lookup_name().into_owned(),
        required: spec.is_required(),
        windows_only: spec.platform == Platform::Windows,
        status,
    }
}

fn print_rows(rows: &[SymbolRow]) {
    let mut current_group = "";
    for row in rows {
        if row.group != current_group {
            current_group = row.group;
            println!();
            println!("[{}]", current_group);
        }
        let policy = if row.required { "required" } else { "optional" };
        let platform = if row.windows_only { " (windows)" } else { "" };
        println!(
            "  {:<36} {:<40} {:<8}{} {}",
            row.name,
            row.lookup,
            policy,
            platform,
            row.status.unwrap_or("-")
        );
    }
    println!();
}
