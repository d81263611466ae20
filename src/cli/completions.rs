use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    simbundle completions bash > ~/.bash_completion.d/simbundle\n\n\
                  Generate zsh completions:\n    simbundle completions zsh > ~/.zfunc/_simbundle\n\n\
                  Generate fish completions:\n    simbundle completions fish > ~/.config/fish/completions/simbundle.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
