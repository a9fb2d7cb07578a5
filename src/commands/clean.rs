//! Implementation of the `doit clean` command.

use super::{CommandDoc, DoitCommand, Invocation, read_dodo};
use crate::engine::CleanRequest;
use crate::error::Result;
use crate::options::{OptionSpec, ParamSet, catalog};

/// Run clean actions or remove targets.
#[derive(Debug, Clone, Copy, Default)]
pub struct Clean;

impl DoitCommand for Clean {
    fn name(&self) -> &'static str {
        "clean"
    }

    fn doc(&self) -> CommandDoc {
        CommandDoc {
            purpose: "clean action / remove targets",
            usage: "[TASK ...]",
            description: Some(
                "If no task is specified clean default tasks and set --clean-dep automatically.",
            ),
        }
    }

    fn cmd_options(&self) -> Vec<OptionSpec> {
        vec![
            catalog::clean_dep(),
            catalog::clean_all(),
            catalog::clean_dryrun(),
        ]
    }

    fn execute(
        &self,
        mut params: ParamSet,
        args: &[String],
        ctx: &mut Invocation<'_>,
    ) -> Result<i32> {
        let manifest = read_dodo(&mut params, args, ctx)?;
        // The engine decides between explicit and default tasks itself.
        let request = CleanRequest {
            tasks: &manifest.tasks,
            base_dir: manifest.base_dir.clone(),
            dry_run: params.flag("dryrun")?,
            clean_dep: params.flag("cleandep")?,
            clean_all: params.flag("cleanall")?,
            default_tasks: manifest.config.default_tasks.clone(),
            selected: args.to_vec(),
        };
        ctx.engine.clean(request, &mut *ctx.out)
    }
}
