use clap::CommandFactory;
use clap_complete::{Shell, generate};

pub fn execute<C: CommandFactory>(shell: Shell) {
    let mut cmd = C::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut std::io::stdout());
}
