//! tco-runner: headless driver for the NAC TCO engine.
//!
//! Usage:
//!   tco-runner --vendors portnox,cisco,aruba --settings scenario.json
//!   tco-runner --vendors portnox,cisco --json
//!   tco-runner --sensitivity deviceCount --vendor portnox --range 30 --steps 5
//!   tco-runner --db runs.db --label "Q3 proposal"
//!   tco-runner --ipc-mode

use anyhow::Result;
use nac_tco_core::{
    engine::{CalculationResults, TcoEngine, DEFAULT_BASELINE_VENDOR, SUBJECT_VENDOR},
    sensitivity::{SensitivityParameter, TORNADO_RANGE_PCT},
    store::ScenarioStore,
    SettingsOverride, VendorCatalog,
};
use std::env;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    Calculate {
        #[serde(default)]
        vendors: Vec<String>,
        #[serde(default)]
        settings: Option<SettingsOverride>,
    },
    Sensitivity {
        vendor: String,
        #[serde(default = "default_baseline")]
        baseline: String,
        parameter: SensitivityParameter,
        #[serde(default = "default_range")]
        range: f64,
        #[serde(default = "default_steps")]
        steps: usize,
        #[serde(default)]
        settings: Option<SettingsOverride>,
    },
    Tornado {
        vendor: String,
        #[serde(default = "default_tornado_range")]
        range: f64,
        #[serde(default)]
        settings: Option<SettingsOverride>,
    },
    ListVendors,
    Quit,
}

fn default_baseline() -> String { DEFAULT_BASELINE_VENDOR.into() }
fn default_range() -> f64 { 30.0 }
fn default_steps() -> usize { 5 }
fn default_tornado_range() -> f64 { TORNADO_RANGE_PCT }

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let json_out = args.iter().any(|a| a == "--json");
    let db = flag_value(&args, "--db").unwrap_or(":memory:");
    let label = flag_value(&args, "--label");
    let vendors: Vec<String> = flag_value(&args, "--vendors")
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();

    let mut engine = TcoEngine::builtin();
    if let Some(path) = flag_value(&args, "--catalog") {
        let catalog = VendorCatalog::load(path)?;
        engine = engine.with_catalog(Arc::new(catalog));
    }

    let over = match flag_value(&args, "--settings") {
        Some(path) => Some(SettingsOverride::load(path)?),
        None => None,
    };

    let store = ScenarioStore::open(db)?;
    store.migrate()?;

    if ipc_mode {
        return run_ipc_loop(&engine, &store);
    }

    if let Some(param) = flag_value(&args, "--sensitivity") {
        let parameter = parse_parameter(param)?;
        let vendor = flag_value(&args, "--vendor").unwrap_or(SUBJECT_VENDOR);
        let range = parse_arg(&args, "--range", default_range());
        let steps = parse_arg(&args, "--steps", default_steps());
        return print_sensitivity(&engine, vendor, parameter, range, steps, over.as_ref(), json_out);
    }

    let results = engine.compute_all(&vendors, over.as_ref());
    let settings = engine.resolve(over.as_ref());
    let run_id = store.record_run(label, &vendors, &settings, &results)?;

    if json_out {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        println!("NAC TCO — tco-runner");
        println!("  run_id:    {run_id}");
        println!("  devices:   {}", settings.device_count);
        println!("  locations: {}", settings.locations);
        println!("  years:     {}", settings.years_to_project);
        println!("  db:        {db}");
        println!();
        print_summary(&results, settings.years_to_project);
    }

    Ok(())
}

fn run_ipc_loop(engine: &TcoEngine, store: &ScenarioStore) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                write_error(&mut stdout, &e.to_string())?;
                continue;
            }
        };

        match cmd {
            IpcCommand::Quit => break,
            IpcCommand::Calculate { vendors, settings } => {
                let results = engine.compute_all(&vendors, settings.as_ref());
                let resolved = engine.resolve(settings.as_ref());
                store.record_run(None, &vendors, &resolved, &results)?;
                writeln!(stdout, "{}", serde_json::to_string(&results)?)?;
            }
            IpcCommand::Sensitivity { vendor, baseline, parameter, range, steps, settings } => {
                match engine.sensitivity(&vendor, &baseline, parameter, range, steps, settings.as_ref()) {
                    Some(sweep) => writeln!(stdout, "{}", serde_json::to_string(&sweep)?)?,
                    None => write_error(&mut stdout, &format!("unknown vendor: {vendor}"))?,
                }
            }
            IpcCommand::Tornado { vendor, range, settings } => {
                match engine.tornado(&vendor, range, settings.as_ref()) {
                    Some(tornado) => writeln!(stdout, "{}", serde_json::to_string(&tornado)?)?,
                    None => write_error(&mut stdout, &format!("unknown vendor: {vendor}"))?,
                }
            }
            IpcCommand::ListVendors => {
                let vendors: Vec<_> = engine.catalog().iter().collect();
                writeln!(stdout, "{}", serde_json::to_string(&vendors)?)?;
            }
        }
        stdout.flush()?;
    }
    Ok(())
}

fn write_error(out: &mut impl Write, message: &str) -> Result<()> {
    let err_json = serde_json::json!({ "error": message });
    writeln!(out, "{}", err_json)?;
    out.flush()?;
    Ok(())
}

fn print_summary(results: &CalculationResults, years: u32) {
    if results.vendors.is_empty() {
        println!("  (No known vendors selected)");
        return;
    }

    println!("=== {years}-YEAR TCO ===");
    for v in &results.vendors {
        let roi = v
            .roi
            .as_ref()
            .map(|r| format!("ROI {:.1}% | Payback {:.1} mo", r.roi, r.payback_period))
            .unwrap_or_else(|| "ROI n/a".into());
        println!(
            "  {:<18} | TCO ${:>12.0} | Initial ${:>10.0} | Annual ${:>10.0} | {roi}",
            v.name, v.tco.three_year_tco, v.tco.total_initial_cost, v.tco.total_annual_cost
        );
    }

    println!();
    println!("=== RISK ===");
    for v in &results.vendors {
        println!(
            "  {:<18} | Reduction {:>3}% | Breach savings ${:>9.0} | MTTR {:>3} min",
            v.name, v.risk.risk_reduction, v.risk.breach_cost_savings, v.risk.mttr
        );
    }

    println!();
    println!("=== SUMMARY ===");
    let s = &results.summary;
    if let Some(h) = &s.lowest_tco {
        println!("  Lowest TCO:      {} (${:.0})", h.vendor_id, h.value);
    }
    if let Some(h) = &s.fastest_payback {
        println!("  Fastest payback: {} ({:.1} mo)", h.vendor_id, h.value);
    }
    if let Some(h) = &s.highest_roi {
        println!("  Highest ROI:     {} ({:.1}%)", h.vendor_id, h.value);
    }

    if !results.comparisons.is_empty() {
        println!();
        println!("=== COMPARISONS ===");
        for c in &results.comparisons {
            println!(
                "  {} vs {:<12} | TCO savings ${:>12.0} ({:.1}%) | Risk +{} pts",
                c.vendor1, c.vendor2, c.tco_savings, c.tco_savings_percentage,
                c.risk_reduction_difference
            );
        }
    }
}

fn print_sensitivity(
    engine: &TcoEngine,
    vendor: &str,
    parameter: SensitivityParameter,
    range: f64,
    steps: usize,
    over: Option<&SettingsOverride>,
    json_out: bool,
) -> Result<()> {
    let Some(sweep) = engine.sensitivity(vendor, engine.baseline(), parameter, range, steps, over)
    else {
        anyhow::bail!("unknown vendor: {vendor}");
    };

    if json_out {
        println!("{}", serde_json::to_string_pretty(&sweep)?);
        return Ok(());
    }

    println!("=== SENSITIVITY: {} for {vendor} (±{range}%) ===", parameter.label());
    for p in &sweep.points {
        println!("  {:>12.2} | TCO ${:>12.0} | ROI {:>7.1}%", p.value, p.tco, p.roi);
    }
    println!("  elasticity: {:.2}x ({})", sweep.elasticity, sweep.rating.label());
    match sweep.breakeven {
        Some(value) => println!("  breakeven:  {value:.2}"),
        None => println!("  breakeven:  not found"),
    }
    Ok(())
}

fn parse_parameter(name: &str) -> Result<SensitivityParameter> {
    serde_json::from_value(serde_json::Value::String(name.to_string()))
        .map_err(|_| anyhow::anyhow!("unknown sensitivity parameter: {name}"))
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
