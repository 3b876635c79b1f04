use clap::CommandFactory;
use clap_complete::Shell;

use super::CmdResult;

pub fn run<C: CommandFactory>(shell: Shell) -> CmdResult {
    let mut cmd = C::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
    Ok(())
}
