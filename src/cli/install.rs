use std::path::PathBuf;

use clap::Parser;

use crate::accounts::AccountPolicy;
use crate::installer::InstallOptions;

/// Arguments for the install command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Install the package in the current directory:\n    guru install\n\n\
                   Install several packages in order:\n    guru install ./base ./webapp\n\n\
                   Install under another prefix:\n    guru install ./tool --prefix /opt/tool\n\n\
                   Stage a root filesystem overlay elsewhere:\n    guru install ./tool --root /mnt/image")]
pub struct InstallArgs {
    /// Package directories to install, in order (defaults to the current directory)
    #[arg(value_name = "PACKAGE")]
    pub packages: Vec<String>,

    /// Prefix for bin/, lib/ and share/
    #[arg(long, short = 'p', env = "GURU_PREFIX", default_value = InstallOptions::DEFAULT_PREFIX)]
    pub prefix: PathBuf,

    /// Root filesystem for the fs/ overlay and the group/passwd databases
    #[arg(long, env = "GURU_ROOT", default_value = "/")]
    pub root: PathBuf,

    /// Manual page directory (defaults to <PREFIX>/share/man)
    #[arg(long, env = "GURU_MAN_DIR")]
    pub man_dir: Option<PathBuf>,

    /// Users with a uid below this are created as system accounts
    #[arg(long, value_name = "UID", default_value_t = AccountPolicy::default().system_id_below)]
    pub system_id_below: u32,

    /// Largest uid a package may create
    #[arg(long, value_name = "UID", default_value_t = AccountPolicy::default().max_uid)]
    pub max_uid: u32,

    /// Do not print status lines
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

impl From<&InstallArgs> for InstallOptions {
    fn from(args: &InstallArgs) -> Self {
        let mut options = InstallOptions::with_prefix(&args.prefix);
        options.root = args.root.clone();
        if let Some(man_dir) = &args.man_dir {
            options.man_dir = man_dir.clone();
        }
        options.accounts = AccountPolicy {
            system_id_below: args.system_id_below,
            max_uid: args.max_uid,
        };
        options
    }
}
