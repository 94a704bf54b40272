//! # xtask - Автоматизация сборки проекта
//!
//! Команды для проверки воркспейса локально и в CI. См. [`HELP_TEXT`].

use anyhow::{Result, bail};
use xshell::{Shell, cmd};

/// Текст справки для `cargo run -p xtask -- help`.
pub const HELP_TEXT: &str = r#"xtask

Использование:
  cargo run -p xtask -- <команда>

Команды:
  help         Показать это сообщение
  fmt          Запустить rustfmt
  fmt-check    Проверить форматирование (CI)
  clippy       Запустить clippy (воркспейс)
  test         Собрать courier_scan и запустить все тесты, включая e2e
  ci           fmt-check + clippy + test
  demo         Прогнать courier_scan на фикстуре e2e
"#;

fn main() -> Result<()> {
    let cmd = std::env::args().nth(1).unwrap_or_else(|| "help".to_string());
    let sh = Shell::new()?;
    sh.change_dir(project_root());

    match cmd.as_str() {
        "help" | "-h" | "--help" => {
            println!("{HELP_TEXT}");
            Ok(())
        }
        "fmt" => Ok(cmd!(sh, "cargo fmt --all").run()?),
        "fmt-check" => fmt_check(&sh),
        "clippy" => clippy(&sh),
        "test" => test(&sh),
        "ci" => {
            fmt_check(&sh)?;
            clippy(&sh)?;
            test(&sh)
        }
        "demo" => {
            let fixture = "tests/e2e/fixtures/mixed_session.txt";
            Ok(cmd!(sh, "cargo run -q -p scanner-cli -- scan --input {fixture}").run()?)
        }
        other => bail!("Неизвестная команда: {other}\n\nЗапустите: cargo run -p xtask -- help"),
    }
}

fn fmt_check(sh: &Shell) -> Result<()> {
    Ok(cmd!(sh, "cargo fmt --all -- --check").run()?)
}

fn clippy(sh: &Shell) -> Result<()> {
    Ok(cmd!(sh, "cargo clippy --workspace --all-targets -- -D warnings").run()?)
}

/// e2e тесты запускают готовый бинарник, поэтому сначала собираем воркспейс.
fn test(sh: &Shell) -> Result<()> {
    cmd!(sh, "cargo build --workspace").run()?;
    cmd!(sh, "cargo test --workspace").run()?;
    Ok(())
}

/// Корень воркспейса: родитель каталога этого крейта.
fn project_root() -> std::path::PathBuf {
    let manifest = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest.parent().unwrap_or(manifest).to_path_buf()
}
