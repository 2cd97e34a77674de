pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DESCRIPTION: &str = "Links and installs TypeScript declaration packages";
pub const BIN_NAME: &str = "link-type-definitions";
pub const COMMANDS: &[(&str, &str, &[&str])] = &[
    (
        "install",
        "Fetches typeDefinitions from the registry or git",
        &["i"],
    ),
    ("link", "Links type definitions listed in package.json", &["ln"]),
    ("unlink", "Removes linked type definitions", &[]),
    (
        "setup",
        "Wires link-type-definitions into the install lifecycle",
        &[],
    ),
    (
        "help",
        "Shows help information for link-type-definitions or a specific command",
        &[],
    ),
];
pub const EXAMPLES: &[(&str, &str)] = &[
    ("link-type-definitions link", "Link all configured modules"),
    (
        "link-type-definitions link @types/node --save",
        "Link one module and save it",
    ),
    (
        "link-type-definitions unlink @types/node",
        "Unlink a module",
    ),
    (
        "link-type-definitions install @types/node@12.11.1",
        "Fetch a declaration package",
    ),
    ("link-type-definitions link --dry-run", "Show planned actions"),
    ("link-type-definitions setup", "Set up the current project"),
];

pub const USER_AGENT: &str = "link-type-definitions/0.1.0";
pub const MAX_ATTEMPTS: u32 = 4;
pub const REGISTRY_URL: &str = "https://registry.npmjs.org";

pub const MANIFEST_FILE: &str = "package.json";
pub const GITIGNORE_FILE: &str = ".gitignore";
pub const INDEX_FILE: &str = "index.d.ts";
pub const DEFAULT_NAMESPACE: &str = "_link-type-definitions";
pub const TYPES_ROOT: &str = "node_modules/@types";
pub const SCRATCH_ROOT: &str = ".tmp";
pub const ARCHIVE_ROOT_DIR: &str = "package";
pub const PACKAGE_MANAGERS: &[&str] = &["pnpm", "yarn", "npm"];
