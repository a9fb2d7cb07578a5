//! Implementation of the `doit list` command.

use super::{CommandDoc, DoitCommand, Invocation, dep_file, read_dodo};
use crate::engine::ListRequest;
use crate::error::Result;
use crate::options::{OptionSpec, ParamSet, catalog};

/// List tasks declared in the manifest.
#[derive(Debug, Clone, Copy, Default)]
pub struct List;

impl DoitCommand for List {
    fn name(&self) -> &'static str {
        "list"
    }

    fn doc(&self) -> CommandDoc {
        CommandDoc {
            purpose: "list tasks from dodo file",
            usage: "[TASK ...]",
            description: None,
        }
    }

    fn cmd_options(&self) -> Vec<OptionSpec> {
        vec![
            catalog::list_all(),
            catalog::list_quiet(),
            catalog::list_status(),
            catalog::list_private(),
            catalog::list_deps(),
        ]
    }

    fn execute(
        &self,
        mut params: ParamSet,
        args: &[String],
        ctx: &mut Invocation<'_>,
    ) -> Result<i32> {
        let manifest = read_dodo(&mut params, args, ctx)?;
        // Listing never falls back to the default tasks.
        let request = ListRequest {
            dep_file: dep_file(&params)?,
            tasks: &manifest.tasks,
            base_dir: manifest.base_dir.clone(),
            selected: args.to_vec(),
            include_subtasks: params.flag("all")?,
            print_doc: !params.flag("quiet")?,
            print_status: params.flag("status")?,
            print_private: params.flag("private")?,
            print_dependencies: params.flag("list_deps")?,
        };
        ctx.engine.list(request, &mut *ctx.out)
    }
}
