//! Implementation of the `doit ignore` command.

use super::{CommandDoc, DoitCommand, Invocation, dep_file, read_dodo};
use crate::engine::IgnoreRequest;
use crate::error::Result;
use crate::options::ParamSet;

/// Mark tasks to be skipped on subsequent runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ignore;

impl DoitCommand for Ignore {
    fn name(&self) -> &'static str {
        "ignore"
    }

    fn doc(&self) -> CommandDoc {
        CommandDoc {
            purpose: "ignore task (skip) on subsequent runs",
            usage: "TASK [TASK ...]",
            description: None,
        }
    }

    fn execute(
        &self,
        mut params: ParamSet,
        args: &[String],
        ctx: &mut Invocation<'_>,
    ) -> Result<i32> {
        let manifest = read_dodo(&mut params, args, ctx)?;
        // Ignoring requires explicit names; default tasks do not apply.
        let request = IgnoreRequest {
            dep_file: dep_file(&params)?,
            tasks: &manifest.tasks,
            base_dir: manifest.base_dir.clone(),
            selected: args.to_vec(),
        };
        ctx.engine.ignore(request, &mut *ctx.out)
    }
}
