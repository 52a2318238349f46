//! Miscellaneous commands: industries, config, doctor, completions

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use colored::Colorize;
use std::io;

use seoaio::aio::ClaudeCliOracle;
use seoaio::cli::{Cli, CompletionShell, ConfigCommands, Toggle};
use seoaio::config::Config;
use seoaio::corpus::{INDUSTRY_CONTENTS, INDUSTRY_PROFILES};
use seoaio::error::Result;

/// List the industry keyword corpus and the content profiles
pub fn cmd_industries(json: bool) -> Result<()> {
    if json {
        let output = serde_json::json!({
            "industries": INDUSTRY_PROFILES,
            "content_profiles": INDUSTRY_CONTENTS.iter().collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("\n{}\n", "Industries (detection)".bold());
    for profile in INDUSTRY_PROFILES {
        println!("  {}", profile.name.cyan());
        println!("    primary:     {}", profile.primary.join(", "));
        println!("    secondary:   {}", profile.secondary.join(", ").dimmed());
        println!("    specialized: {}", profile.specialized.join(", ").dimmed());
    }

    println!("\n{}\n", "Content profiles (fit scoring)".bold());
    for profile in INDUSTRY_CONTENTS.iter() {
        let keywords = if profile.keywords.is_empty() {
            "(none)".to_string()
        } else {
            profile.keywords.join(", ")
        };
        println!("  {:<14} {:<10} {}", profile.key, profile.display_name, keywords);
    }
    println!();
    Ok(())
}

pub fn cmd_config(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show { json } => {
            let config = Config::load()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
                return Ok(());
            }
            println!("\n{}\n", "Configuration".bold());
            println!("  Default balance: SEO {}% / AIO {}%", 100 - u16::from(config.default_balance), config.default_balance);
            println!("  Industry:        {}", config.industry.as_deref().unwrap_or("(auto)"));
            println!("  AI evaluation:   {}", if config.ai.enabled { "on".green() } else { "off".yellow() });
            println!("  AI command:      {}", config.ai.command);
            if let Some(model) = &config.ai.model {
                println!("  AI model:        {}", model);
            }
            println!();
        }
        ConfigCommands::Path => {
            println!("{}", Config::config_path()?.display());
        }
        ConfigCommands::SetBalance { balance } => {
            let mut config = Config::load()?;
            config.default_balance = balance;
            config.save()?;
            println!("Default balance set to SEO {}% / AIO {}%.", 100 - u16::from(balance), balance);
        }
        ConfigCommands::SetIndustry { industry } => {
            let mut config = Config::load()?;
            let industry = industry.trim();
            config.industry = match industry {
                "" | "none" => None,
                other => Some(other.to_string()),
            };
            config.save()?;
            match &config.industry {
                Some(name) => println!("Default industry set to '{}'.", name),
                None => println!("Default industry cleared (auto detection)."),
            }
        }
        ConfigCommands::SetAi { state } => {
            let mut config = Config::load()?;
            config.ai.enabled = state == Toggle::On;
            config.save()?;
            println!("AI evaluation {}.", if config.ai.enabled { "enabled" } else { "disabled" });
        }
    }
    Ok(())
}

/// Check that the oracle command and config file are usable
pub fn cmd_doctor() -> Result<()> {
    println!("\nseoaio doctor\n");

    println!("  seoaio binary: v{}", env!("CARGO_PKG_VERSION"));

    match Config::load() {
        Ok(config) => {
            println!("  Config: OK");
            let oracle = ClaudeCliOracle::new(&config.ai.command, config.ai.model.clone());
            match oracle.version() {
                Some(v) => println!("  AI command ({}): {} (installed)", config.ai.command, v),
                None => println!("  AI command ({}): NOT INSTALLED (use --no-ai)", config.ai.command),
            }
        }
        Err(e) => println!("  Config: ERROR - {}", e),
    }

    println!();
    Ok(())
}

pub fn cmd_completions(shell: CompletionShell) -> Result<()> {
    let mut cmd = Cli::command();
    let shell = match shell {
        CompletionShell::Bash => Shell::Bash,
        CompletionShell::Zsh => Shell::Zsh,
        CompletionShell::Fish => Shell::Fish,
        CompletionShell::Powershell => Shell::PowerShell,
    };
    generate(shell, &mut cmd, "seoaio", &mut io::stdout());
    Ok(())
}
