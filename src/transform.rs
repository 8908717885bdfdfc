//! Catalog → completion tree
//!
//! A pure function of the catalog and whether a Symfony Flex lock file is
//! present. Catalog order is kept everywhere: commands, arguments, options.

use crate::catalog::{Catalog, CatalogArgument, CatalogCommand, CatalogOption};
use crate::completions::{ArgSpec, Generator, OptionSpec, Subcommand, Template, COMPOSER_ICON};

/// Commands whose arguments get a value generator
const GENERATORS_BY_COMMAND: &[(&str, Generator)] = &[
    ("require", Generator::PackageSearch),
    ("update", Generator::ManifestDependencies),
    ("remove", Generator::ManifestDependencies),
];

pub fn generators_for(command: &str) -> Vec<Generator> {
    GENERATORS_BY_COMMAND
        .iter()
        .filter(|(name, _)| *name == command)
        .map(|(_, generator)| *generator)
        .collect()
}

/// One subcommand per catalog command, then the Flex recipe commands when
/// the lock file exists.
pub fn build_subcommands(catalog: &Catalog, has_lock_file: bool) -> Vec<Subcommand> {
    let mut subcommands: Vec<Subcommand> =
        catalog.commands.iter().map(command_to_subcommand).collect();
    if has_lock_file {
        subcommands.extend(recipe_subcommands());
    }
    subcommands
}

pub fn command_to_subcommand(command: &CatalogCommand) -> Subcommand {
    let generators = generators_for(&command.name);
    Subcommand {
        name: vec![command.name.clone()],
        description: Some(command.description.clone()),
        icon: Some(COMPOSER_ICON.to_string()),
        args: command
            .definition
            .arguments
            .values()
            .map(|arg| argument_to_spec(arg, &generators))
            .collect(),
        options: command.definition.options.values().map(option_to_spec).collect(),
    }
}

fn argument_to_spec(arg: &CatalogArgument, generators: &[Generator]) -> ArgSpec {
    ArgSpec {
        name: Some(arg.name.clone()),
        description: Some(arg.description.clone()),
        is_optional: !arg.is_required,
        default: arg.default_value(),
        is_variadic: arg.is_array,
        generators: generators.to_vec(),
        template: None,
    }
}

fn option_to_spec(option: &CatalogOption) -> OptionSpec {
    let mut name = vec![option.name.clone()];
    if !option.shortcut.trim().is_empty() {
        name.push(option.shortcut.clone());
    }

    OptionSpec {
        name,
        description: Some(option.description.clone()),
        // The value's requiredness, not the option's
        is_required: option.is_value_required,
        args: option.accept_value.then(ArgSpec::default),
        ..Default::default()
    }
}

/// `recipes` and `recipes:install`, registered by Symfony Flex
pub fn recipe_subcommands() -> Vec<Subcommand> {
    let mut recipes_options = vec![OptionSpec::flag(
        ["-o", "--outdated"],
        "Show only recipes that are outdated",
    )];
    recipes_options.extend(common_options());

    let mut install_options = vec![OptionSpec::flag(
        ["--force"],
        "Overwrite existing files when a new version of a recipe is available",
    )
    .dangerous()];
    install_options.extend(common_options());

    vec![
        Subcommand {
            name: vec!["recipes".into(), "symfony:recipes".into()],
            description: Some("Shows information about all available recipes".into()),
            icon: Some(COMPOSER_ICON.to_string()),
            args: vec![ArgSpec {
                name: Some("package".into()),
                description: Some("Package to inspect, if not provided all packages are".into()),
                is_optional: true,
                ..Default::default()
            }],
            options: recipes_options,
        },
        Subcommand {
            name: vec![
                "recipes:install".into(),
                "symfony:recipes:install".into(),
                "symfony:sync-recipes".into(),
                "sync-recipes".into(),
                "fix-recipes".into(),
            ],
            description: Some(
                "Installs or reinstalls recipes for already installed packages".into(),
            ),
            icon: Some(COMPOSER_ICON.to_string()),
            args: vec![ArgSpec {
                name: Some("packages".into()),
                description: Some("Recipes that should be installed".into()),
                is_variadic: true,
                ..Default::default()
            }],
            options: install_options,
        },
    ]
}

/// Options every Composer command accepts
fn common_options() -> Vec<OptionSpec> {
    vec![
        OptionSpec::flag(
            ["-h", "--help"],
            "Display help for the given command. When no command is given display help for the list command",
        ),
        OptionSpec::flag(["-q", "--quiet"], "Do not output any message"),
        OptionSpec::flag(["-V", "--version"], "Display this application version"),
        OptionSpec::flag(["--ansi"], "Force ANSI output").exclusive_on("--no-ansi"),
        OptionSpec::flag(["--no-ansi"], "Disable ANSI output").exclusive_on("--ansi"),
        OptionSpec::flag(["-n", "--no-interaction"], "Do not ask any interactive question"),
        OptionSpec::flag(["--profile"], "Display timing and memory usage information"),
        OptionSpec::flag(["--no-plugins"], "Whether to disable plugins"),
        OptionSpec::flag(
            ["-d", "--working-dir"],
            "If specified, use the given directory as working directory",
        )
        .with_arg(ArgSpec {
            name: Some("dir".into()),
            template: Some(Template::Folders),
            ..Default::default()
        }),
        OptionSpec::flag(["--no-cache"], "Prevent use of the cache"),
        OptionSpec::flag(["-v"], "Normal output verbosity"),
        OptionSpec::flag(["-vv"], "More verbose output"),
        OptionSpec::flag(["-vvv"], "Debug output"),
    ]
}
