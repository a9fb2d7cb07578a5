//! Implementation of the `doit run` command (the default command).

use super::{CommandDoc, DoitCommand, Invocation, dep_file, read_dodo};
use crate::engine::RunRequest;
use crate::error::Result;
use crate::options::{OptionSpec, ParamSet, catalog};

/// Run the selected tasks, or the manifest's default tasks.
#[derive(Debug, Clone, Copy, Default)]
pub struct Run;

impl DoitCommand for Run {
    fn name(&self) -> &'static str {
        "run"
    }

    fn doc(&self) -> CommandDoc {
        CommandDoc {
            purpose: "run tasks",
            usage: "[TASK/TARGET...]",
            description: None,
        }
    }

    fn cmd_options(&self) -> Vec<OptionSpec> {
        vec![
            catalog::always(),
            catalog::continue_on_failure(),
            catalog::verbosity(),
            catalog::reporter(),
            catalog::outfile(),
            catalog::num_process(),
        ]
    }

    fn execute(
        &self,
        mut params: ParamSet,
        args: &[String],
        ctx: &mut Invocation<'_>,
    ) -> Result<i32> {
        let manifest = read_dodo(&mut params, args, ctx)?;
        let request = RunRequest {
            dep_file: dep_file(&params)?,
            tasks: &manifest.tasks,
            base_dir: manifest.base_dir.clone(),
            outfile: params.path("outfile")?,
            selected: manifest.selected.clone(),
            verbosity: params.int("verbosity")?,
            always_execute: params.flag("always")?,
            continue_on_failure: params.flag("continue")?,
            reporter: params
                .string("reporter")?
                .unwrap_or_else(|| "default".to_string()),
            num_process: params.int("num_process")?.unwrap_or(0),
        };
        ctx.engine.run(request, &mut *ctx.out)
    }
}
