//! `fotno format-manifests` command

use anyhow::Result;

use crate::cli::{FormatManifestsArgs, GlobalArgs};
use fotno::core::{Workspace, DEFAULT_SOURCE};
use fotno::ops::format_manifests::{format_manifests, FormatOptions};
use fotno::util::shell::{Shell, Status};
use fotno::util::GlobalContext;

pub fn execute(global: &GlobalArgs, args: FormatManifestsArgs) -> Result<()> {
    let shell = Shell::from_flags(
        global.quiet,
        global.verbose,
        global.color,
        global.message_format,
    );

    let mut ctx = GlobalContext::new()?;
    if let Some(root) = &global.root {
        ctx = ctx.with_root(root);
    }

    // CLI flags override the repository config
    let config = ctx.config().format_manifests;
    let opts = FormatOptions {
        clean: config.clean && !args.no_clean,
        reorder: config.reorder && !args.no_reorder,
        dep_locations: config.dep_locations && !args.no_dep_locations,
    };
    let source = args
        .source
        .or_else(|| config.source.map(Into::into))
        .unwrap_or_else(|| DEFAULT_SOURCE.into());

    let ws = Workspace::new(ctx.root()).with_source(source);

    shell.caption("fotno format-manifests");
    shell.note(format!("Repository root: {}", ws.root().display()));

    if !ws.source_dir().is_dir() {
        shell.warn(format!(
            "source directory `{}` does not exist, no manifests to format",
            ws.source().display()
        ));
    }

    let report = format_manifests(&ws, &opts, &shell)?;

    shell.status(
        Status::Done,
        format!(
            "{} rewritten, {} skipped",
            report.rewritten(),
            report.skipped()
        ),
    );
    shell.json_event(&serde_json::json!({
        "reason": "finished",
        "rewritten": report.rewritten(),
        "skipped": report.skipped(),
    }));

    Ok(())
}
