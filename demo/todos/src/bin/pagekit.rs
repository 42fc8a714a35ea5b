/* demo/todos/src/bin/pagekit.rs */

fn main() -> anyhow::Result<()> {
  pagekit_cli::run(&pagekit_demo::registry())
}
