//! Implementation of the `doit auto` command.

use super::{CommandDoc, DoitCommand, Invocation, dep_file, read_dodo};
use crate::engine::AutoRequest;
use crate::error::Result;
use crate::options::{OptionSpec, ParamSet, catalog};

/// Re-run tasks whenever one of their dependencies changes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Auto;

impl DoitCommand for Auto {
    fn name(&self) -> &'static str {
        "auto"
    }

    fn doc(&self) -> CommandDoc {
        CommandDoc {
            purpose: "automatically execute tasks when a dependency changes",
            usage: "TASK [TASK ...]",
            description: None,
        }
    }

    fn cmd_options(&self) -> Vec<OptionSpec> {
        vec![catalog::verbosity()]
    }

    fn execute(
        &self,
        mut params: ParamSet,
        args: &[String],
        ctx: &mut Invocation<'_>,
    ) -> Result<i32> {
        let manifest = read_dodo(&mut params, args, ctx)?;
        let request = AutoRequest {
            dep_file: dep_file(&params)?,
            tasks: &manifest.tasks,
            base_dir: manifest.base_dir.clone(),
            selected: manifest.selected.clone(),
            verbosity: params.int("verbosity")?,
        };
        ctx.engine.auto(request, &mut *ctx.out)
    }
}
