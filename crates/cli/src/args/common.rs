use clap::{Args, ValueEnum};

#[derive(Debug, Clone, Args)]
pub struct OutputFormatArgs {
    /// Emit JSON instead of a table.
    #[arg(long, conflicts_with = "yaml")]
    pub json: bool,
    /// Emit YAML instead of a table.
    #[arg(long, conflicts_with = "json")]
    pub yaml: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OutputMode {
    Table,
    Json,
    Yaml,
}

impl OutputFormatArgs {
    pub fn mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else if self.yaml {
            OutputMode::Yaml
        } else {
            OutputMode::Table
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
#[value(rename_all = "lowercase")]
pub enum CompletionShell {
    Bash,
    Fish,
    Zsh,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_format_mode_prefers_json_then_yaml() {
        let args = OutputFormatArgs {
            json: true,
            yaml: false,
        };
        assert_eq!(args.mode(), OutputMode::Json);

        let args = OutputFormatArgs {
            json: false,
            yaml: true,
        };
        assert_eq!(args.mode(), OutputMode::Yaml);

        let args = OutputFormatArgs {
            json: false,
            yaml: false,
        };
        assert_eq!(args.mode(), OutputMode::Table);
    }
}
