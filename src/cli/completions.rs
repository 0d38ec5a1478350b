use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    guru completions bash > ~/.bash_completion.d/guru\n\n\
                  Generate zsh completions:\n    guru completions zsh > ~/.zfunc/_guru\n\n\
                  Generate fish completions:\n    guru completions fish > ~/.config/fish/completions/guru.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
