//! Opening a ledger, batch command files, seed export and verification

use anyhow::{bail, Context, Result};
use coopcomply_ledger::{seed, Command, Ledger, LedgerConfig, Snapshot};
use std::fs;
use std::path::Path;

/// Ledger from a snapshot file, or the demo data when no file is given.
pub fn open(config: LedgerConfig, data: Option<&Path>) -> Result<Ledger> {
    match data {
        Some(path) => {
            let snapshot = Snapshot::from_file(path)
                .with_context(|| format!("Failed to read snapshot {:?}", path))?;
            Ledger::from_snapshot(config, snapshot)
                .with_context(|| format!("Snapshot {:?} is inconsistent", path))
        }
        None => seed::demo_with_config(config).context("Demo data rejected"),
    }
}

pub fn run(ledger: &mut Ledger, file: &Path, keep_going: bool, save: Option<&Path>) -> Result<()> {
    let content =
        fs::read_to_string(file).with_context(|| format!("Failed to read {:?}", file))?;
    let commands = Command::batch_from_json(&content)
        .with_context(|| format!("Failed to parse commands in {:?}", file))?;

    let total = commands.len();
    let mut failed = 0;
    for (index, command) in commands.into_iter().enumerate() {
        let name = command.name();
        match ledger.apply(command) {
            Ok(outcome) => {
                let json = serde_json::to_string(&outcome)
                    .with_context(|| format!("Failed to render outcome of command #{}", index + 1))?;
                println!("✅ #{} {}: {}", index + 1, name, json);
            }
            Err(err) if keep_going => {
                failed += 1;
                println!("❌ #{} {}: {}", index + 1, name, err);
            }
            Err(err) => {
                return Err(err).with_context(|| format!("Command #{} ({}) rejected", index + 1, name));
            }
        }
    }
    println!("Applied {}/{} commands", total - failed, total);

    if let Some(path) = save {
        write_snapshot(&ledger.snapshot(), Some(path))?;
    }

    Ok(())
}

pub fn seed(output: Option<&Path>) -> Result<()> {
    write_snapshot(&seed::demo_snapshot()?, output)
}

pub fn verify(ledger: &Ledger) -> Result<()> {
    let issues = ledger.verify_integrity();
    if issues.is_empty() {
        println!(
            "✅ Ledger consistent: {} trainings, {} officers, {} attendance records",
            ledger.training_count(),
            ledger.officer_count(),
            ledger.attendance_count()
        );
        return Ok(());
    }

    for issue in &issues {
        println!("❌ {}", issue);
    }
    bail!("{} integrity issue(s) found", issues.len())
}

fn write_snapshot(snapshot: &Snapshot, output: Option<&Path>) -> Result<()> {
    let json = snapshot.to_json_pretty()?;
    match output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("Failed to write {:?}", path))?;
            println!("✅ Snapshot written: {:?}", path);
        }
        None => println!("{}", json),
    }
    Ok(())
}
