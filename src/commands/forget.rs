//! Implementation of the `doit forget` command.

use super::{CommandDoc, DoitCommand, Invocation, dep_file, read_dodo};
use crate::engine::ForgetRequest;
use crate::error::Result;
use crate::options::ParamSet;

/// Clear the successful-run status of tasks from the dependency database.
#[derive(Debug, Clone, Copy, Default)]
pub struct Forget;

impl DoitCommand for Forget {
    fn name(&self) -> &'static str {
        "forget"
    }

    fn doc(&self) -> CommandDoc {
        CommandDoc {
            purpose: "clear successful run status from internal DB",
            usage: "[TASK ...]",
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
        let request = ForgetRequest {
            dep_file: dep_file(&params)?,
            tasks: &manifest.tasks,
            base_dir: manifest.base_dir.clone(),
            selected: manifest.selected.clone(),
        };
        ctx.engine.forget(request, &mut *ctx.out)
    }
}
