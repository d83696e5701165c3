use cudyn_core::config::CudynConfig;
use cudyn_driver::ffi::CUresult;
use cudyn_driver::{symbols, CudaDriver, DriverVersion};
use serde::Serialize;

// ── Check result types ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
enum CheckStatus {
    Pass,
    Fail,
    Warn,
    Skip,
}

#[derive(Debug, Serialize)]
struct CheckResult {
    name: String,
    status: CheckStatus,
    message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    details: Vec<String>,
}

impl CheckResult {
    fn new(name: &str, status: CheckStatus, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status,
            message: message.to_string(),
            details: Vec::new(),
        }
    }

    fn pass(name: &str, message: &str) -> Self {
        Self::new(name, CheckStatus::Pass, message)
    }

    fn fail(name: &str, message: &str) -> Self {
        Self::new(name, CheckStatus::Fail, message)
    }

    fn warn(name: &str, message: &str) -> Self {
        Self::new(name, CheckStatus::Warn, message)
    }

    fn skip(name: &str, message: &str) -> Self {
        Self::new(name, CheckStatus::Skip, message)
    }

    fn detail(mut self, detail: &str) -> Self {
        self.details.push(detail.to_string());
        self
    }
}

// ── Main entry point ────────────────────────────────────────────────────────

pub fn run_verify(config_path: &str, json: bool) -> anyhow::Result<()> {
    let mut results: Vec<CheckResult> = Vec::new();

    // Check 1: Configuration
    let config = check_config(config_path, &mut results).unwrap_or_default();
    let min_version = config.verify.min_driver_version.as_deref();
    let required = &config.verify.required_capabilities;

    // Check 2: Driver library
    match CudaDriver::get() {
        Ok(driver) => {
            results.push(
                CheckResult::pass("Driver library", &format!("Loaded {}", driver.library_name()))
                    .detail(&format!(
                        "{} entry points bound",
                        driver.symbols().iter().filter(|s| s.is_bound()).count()
                    )),
            );

            // Check 3: Driver version
            results.push(check_version(driver.driver_version(), min_version));

            // Check 4: Required capabilities
            results.push(check_capabilities(required, |name| driver.is_available(name)));

            // Check 5: Optional entry points
            results.push(check_optional(&driver.missing_optional()));
        }
        Err(e) => {
            results.push(
                CheckResult::fail("Driver library", &e.to_string())
                    .detail("Install the NVIDIA driver with CUDA support"),
            );
            for name in ["Driver version", "Capabilities", "Optional entry points"] {
                results.push(CheckResult::skip(name, "Driver not loaded"));
            }
        }
    }

    // Output
    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print_results_pretty(&results);
    }

    // Exit code 1 if any failures
    if results.iter().any(|r| r.status == CheckStatus::Fail) {
        std::process::exit(1);
    }

    Ok(())
}

// ── Check 1: Configuration ──────────────────────────────────────────────────

fn check_config(config_path: &str, results: &mut Vec<CheckResult>) -> Option<CudynConfig> {
    let path = std::path::Path::new(config_path);

    if !path.exists() {
        results.push(
            CheckResult::warn(
                "Configuration",
                &format!("Config file not found: {}", config_path),
            )
            .detail("Using default configuration"),
        );
        return None;
    }

    match CudynConfig::load(config_path) {
        Ok(config) => {
            let mut result =
                CheckResult::pass("Configuration", &format!("Loaded from {}", config_path));
            if let Some(ref min) = config.verify.min_driver_version {
                result = result.detail(&format!("Minimum driver version: {}", min));
            }
            if !config.verify.required_capabilities.is_empty() {
                result = result.detail(&format!(
                    "Required capabilities: {}",
                    config.verify.required_capabilities.join(", ")
                ));
            }
            results.push(result);
            Some(config)
        }
        Err(e) => {
            results.push(CheckResult::fail(
                "Configuration",
                &format!("Failed to parse {}: {}", config_path, e),
            ));
            None
        }
    }
}

// ── Check 3: Driver version ─────────────────────────────────────────────────

fn check_version(reported: Result<DriverVersion, CUresult>, min: Option<&str>) -> CheckResult {
    const NAME: &str = "Driver version";

    let version = match reported {
        Ok(version) => version,
        Err(code) => {
            let result = CheckResult::warn(NAME, "Driver did not report its version")
                .detail(cudyn_driver::result_name(code));
            return match min {
                Some(_) => CheckResult {
                    status: CheckStatus::Fail,
                    ..result
                },
                None => result,
            };
        }
    };

    let Some(min) = min else {
        return CheckResult::pass(NAME, &format!("CUDA {}", version));
    };

    match min.parse::<DriverVersion>() {
        Ok(required) if version >= required => {
            CheckResult::pass(NAME, &format!("CUDA {}", version))
                .detail(&format!("Minimum: {}", required))
        }
        Ok(required) => CheckResult::fail(
            NAME,
            &format!("CUDA {} is older than the required {}", version, required),
        ),
        Err(e) => CheckResult::fail(NAME, &e.to_string()),
    }
}

// ── Check 4: Required capabilities ──────────────────────────────────────────

fn check_capabilities(required: &[String], is_available: impl Fn(&str) -> bool) -> CheckResult {
    const NAME: &str = "Capabilities";

    if required.is_empty() {
        return CheckResult::skip(NAME, "No capabilities required by configuration");
    }

    let mut failures = Vec::new();
    for name in required {
        if symbols::find(name).is_none() {
            failures.push(format!("{}: not a known driver entry point", name));
        } else if !is_available(name) {
            failures.push(format!("{}: not provided by this driver", name));
        }
    }

    if failures.is_empty() {
        CheckResult::pass(NAME, &format!("All {} required entry points available", required.len()))
    } else {
        failures.into_iter().fold(
            CheckResult::fail(NAME, "Required entry points unavailable"),
            |result, failure| result.detail(&failure),
        )
    }
}

// ── Check 5: Optional entry points ──────────────────────────────────────────

fn check_optional(missing: &[&str]) -> CheckResult {
    const NAME: &str = "Optional entry points";

    if missing.is_empty() {
        return CheckResult::pass(NAME, "All optional entry points available");
    }
    missing.iter().fold(
        CheckResult::warn(NAME, &format!("{} not provided by this driver", missing.len())),
        |result, name| result.detail(name),
    )
}

// ── Output formatters ───────────────────────────────────────────────────────

fn print_results_pretty(results: &[CheckResult]) {
    print!("{}", render_report(results));
}

impl CheckStatus {
    fn tag(self) -> &'static str {
        match self {
            CheckStatus::Pass => "ok",
            CheckStatus::Fail => "FAILED",
            CheckStatus::Warn => "warning",
            CheckStatus::Skip => "skipped",
        }
    }
}

/// One line per check, details indented under it, then a tally.
fn render_report(results: &[CheckResult]) -> String {
    let width = results.iter().map(|r| r.name.len()).max().unwrap_or(0);
    let mut out = String::new();

    for result in results {
        out.push_str(&format!(
            "{:<width$}  {:<8} {}\n",
            result.name,
            result.status.tag(),
            result.message,
        ));
        for detail in &result.details {
            out.push_str(&format!("{:<width$}  {:<8} - {}\n", "", "", detail));
        }
    }

    let count = |status: CheckStatus| results.iter().filter(|r| r.status == status).count();
    out.push_str(&format!(
        "\n{} checks: {} ok, {} failed, {} warnings, {} skipped\n",
        results.len(),
        count(CheckStatus::Pass),
        count(CheckStatus::Fail),
        count(CheckStatus::Warn),
        count(CheckStatus::Skip),
    ));
    out
}
