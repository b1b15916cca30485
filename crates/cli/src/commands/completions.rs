use std::io::{self, Write};

use clap::CommandFactory;
use clap_complete::shells::{Bash, Fish, Zsh};
use clap_complete::{Generator, generate};

use crate::args::{Cli, CompletionShell};

pub fn generate_completions(shell: CompletionShell) {
    write_completions(shell, &mut io::stdout());
}

pub fn write_completions(shell: CompletionShell, out: &mut dyn Write) {
    match shell {
        CompletionShell::Bash => emit(Bash, out),
        CompletionShell::Zsh => emit(Zsh, out),
        CompletionShell::Fish => emit(Fish, out),
    }
}

fn emit(shell: impl Generator, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, out);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script_for(shell: CompletionShell) -> String {
        let mut buf = Vec::new();
        write_completions(shell, &mut buf);
        String::from_utf8(buf).expect("completion scripts are utf-8")
    }

    #[test]
    fn scripts_cover_the_command_tree() {
        for shell in [
            CompletionShell::Bash,
            CompletionShell::Zsh,
            CompletionShell::Fish,
        ] {
            let script = script_for(shell);
            assert!(script.contains("peerctl"), "{shell:?} missing binary name");
            assert!(script.contains("peers"), "{shell:?} missing peers subcommand");
            assert!(script.contains("login"), "{shell:?} missing login subcommand");
        }
    }

    #[test]
    fn bash_script_offers_peer_subcommands() {
        let script = script_for(CompletionShell::Bash);
        assert!(script.contains("toggle"));
        assert!(script.contains("completions"));
    }
}
