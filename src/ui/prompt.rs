//! Interactive candidate entry

use dialoguer::{Input, Select, theme::ColorfulTheme};

use crate::config::SpeedPreset;
use crate::core::error::Result;
use crate::core::types::Candidate;
use crate::discovery::loader::{CandidateLoader, LoadCandidates};

pub struct CandidatePrompt {
    theme: ColorfulTheme,
    loader: CandidateLoader,
}

impl Default for CandidatePrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl CandidatePrompt {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
            loader: CandidateLoader::default(),
        }
    }

    /// Ask for a comma-separated list of User-Agents
    pub fn ask_candidates(&self) -> Result<Vec<Candidate>> {
        let entry: String = Input::with_theme(&self.theme)
            .with_prompt("Enter User-Agents (comma-separated)")
            .validate_with(Self::validate_entry)
            .interact_text()?;

        self.loader.parse_list(&entry)
    }

    /// Ask how many User-Agents to check at once
    pub fn ask_speed(&self) -> Result<SpeedPreset> {
        let presets = [SpeedPreset::Medium, SpeedPreset::Fast];
        let labels: Vec<String> = presets
            .iter()
            .map(|preset| speed_label(*preset))
            .collect();

        let selection = Select::with_theme(&self.theme)
            .with_prompt("Select checking speed")
            .items(&labels)
            .default(0)
            .interact()?;

        Ok(presets[selection])
    }

    /// Validation function for the comma-separated entry
    fn validate_entry(input: &String) -> std::result::Result<(), &'static str> {
        match CandidateLoader::default().parse_list(input) {
            Ok(candidates) if !candidates.is_empty() => Ok(()),
            _ => Err("Enter at least one User-Agent"),
        }
    }
}

fn speed_label(preset: SpeedPreset) -> String {
    match preset {
        SpeedPreset::Medium => format!("Medium ({} at once)", preset.concurrency()),
        SpeedPreset::Fast => format!("Fast ({} at once)", preset.concurrency()),
    }
}
