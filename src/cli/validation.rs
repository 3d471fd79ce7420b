use crate::cli::args::{CliArgs, Command};
use crate::model::SortKey;

pub fn validate(args: &CliArgs) -> Result<(), String> {
    if let Some(server) = args.server.as_deref() {
        reqwest::Url::parse(server).map_err(|e| format!("invalid --server '{server}': {e}"))?;
    }
    if let Some(timeout) = args.timeout {
        if timeout == 0 {
            return Err("invalid --timeout, expected positive integer".to_string());
        }
    }
    if let Command::List(list) = &args.command {
        if list.page == 0 {
            return Err("invalid --page, pages start at 1".to_string());
        }
        if let Some(raw) = list.sort.as_deref() {
            if SortKey::parse(raw).is_none() {
                return Err(format!(
                    "invalid --sort '{raw}', expected none, title, or rating"
                ));
            }
        }
    }
    Ok(())
}
