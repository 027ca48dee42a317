use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use directory_client::{
    load_settings, view::render_card, Directory, EmployeeApi, EmployeeForm, FormField,
    HttpEmployeeApi, SubmitOutcome,
};
use shared::domain::{Employee, EmployeeId};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod render;

#[derive(Parser, Debug)]
#[command(name = "directory_cli", about = "Manage the employee directory")]
struct Args {
    /// Overrides the configured employees API base URL.
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lists every employee.
    List,
    Show {
        id: i64,
    },
    Add(FieldArgs),
    Edit {
        id: i64,
        #[command(flatten)]
        fields: FieldArgs,
    },
    Delete {
        id: i64,
        /// Skips the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

/// Form fields; omitted flags keep the current value, an empty string clears
/// an optional field.
#[derive(ClapArgs, Debug, Default)]
struct FieldArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    department: Option<String>,
    #[arg(long)]
    position: Option<String>,
    #[arg(long)]
    salary: Option<String>,
    #[arg(long)]
    hire_date: Option<String>,
}

impl FieldArgs {
    fn apply(self, form: &mut EmployeeForm) {
        let values = [
            (FormField::Name, self.name),
            (FormField::Email, self.email),
            (FormField::Phone, self.phone),
            (FormField::Department, self.department),
            (FormField::Position, self.position),
            (FormField::Salary, self.salary),
            (FormField::HireDate, self.hire_date),
        ];
        for (field, value) in values {
            if let Some(value) = value {
                form.set_field(field, value);
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    let settings = load_settings().with_api_base_url(args.api_url);
    let api = HttpEmployeeApi::from_settings(&settings).context("invalid client settings")?;
    debug!(api_base_url = api.base_url(), "using employees API");

    match args.command {
        Command::List => list(&api).await,
        Command::Show { id } => show(&api, EmployeeId(id)).await,
        Command::Add(fields) => {
            let mut form = EmployeeForm::create();
            fields.apply(&mut form);
            save(&api, form).await
        }
        Command::Edit { id, fields } => {
            let employee = fetch_employee(&api, EmployeeId(id)).await?;
            let mut form = EmployeeForm::edit(&employee);
            fields.apply(&mut form);
            save(&api, form).await
        }
        Command::Delete { id, yes } => delete(&api, EmployeeId(id), yes).await,
    }
}

async fn list(api: &dyn EmployeeApi) -> Result<()> {
    let mut directory = Directory::new();
    directory.reload(api).await;
    for line in render::directory_lines(&directory.view()) {
        println!("{line}");
    }
    match directory.error() {
        Some(error) => bail!("{error}"),
        None => Ok(()),
    }
}

async fn show(api: &dyn EmployeeApi, id: EmployeeId) -> Result<()> {
    let employee = fetch_employee(api, id).await?;
    for line in render::card_lines(&render_card(&employee, None)) {
        println!("{line}");
    }
    Ok(())
}

async fn fetch_employee(api: &dyn EmployeeApi, id: EmployeeId) -> Result<Employee> {
    api.get(id)
        .await
        .with_context(|| format!("failed to fetch employee #{id}"))
}

async fn save(api: &dyn EmployeeApi, mut form: EmployeeForm) -> Result<()> {
    match form.submit(api).await {
        SubmitOutcome::Saved(employee) => {
            println!("Saved employee #{} {}", employee.id, employee.name);
            Ok(())
        }
        SubmitOutcome::Invalid(errors) => {
            eprintln!("{}: {} invalid field(s)", form.title(), errors.len());
            for line in render::field_error_lines(&errors) {
                eprintln!("{line}");
            }
            bail!("employee not saved")
        }
        SubmitOutcome::Failed(message) => bail!("{message}"),
        SubmitOutcome::Busy => bail!("a submission is already in progress"),
    }
}

async fn delete(api: &dyn EmployeeApi, id: EmployeeId, skip_prompt: bool) -> Result<()> {
    let mut directory = Directory::new();
    directory.reload(api).await;
    if let Some(error) = directory.error() {
        bail!("{error}");
    }
    if !directory.request_delete(id) {
        bail!("Employee with ID {id} not found");
    }

    if !skip_prompt {
        let prompt = directory.pending_delete_prompt().unwrap_or_default();
        let stdin = io::stdin();
        if !confirm(&prompt, &mut stdin.lock(), &mut io::stdout())? {
            directory.cancel_delete();
            println!("Cancelled");
            return Ok(());
        }
    }

    match directory.delete_confirmed(api).await {
        Some(Ok(())) => {
            println!("Deleted employee #{id}");
            Ok(())
        }
        _ => {
            let message = directory
                .card_state(id)
                .and_then(|state| state.error.clone())
                .unwrap_or_else(|| "Failed to delete employee".to_string());
            bail!("{message}")
        }
    }
}

fn confirm(prompt: &str, input: &mut impl BufRead, output: &mut impl Write) -> Result<bool> {
    write!(output, "{prompt} [y/N] ")?;
    output.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

#[cfg(test)]
mod tests {
    use directory_client::ClientError;

    use super::*;

    #[test]
    fn parses_edit_with_partial_fields() {
        let args = Args::parse_from([
            "directory_cli",
            "--api-url",
            "http://localhost:9000/api",
            "edit",
            "4",
            "--position",
            "",
            "--hire-date",
            "2023-01-15",
        ]);
        assert_eq!(args.api_url.as_deref(), Some("http://localhost:9000/api"));
        let Command::Edit { id, fields } = args.command else {
            panic!("expected edit");
        };
        assert_eq!(id, 4);
        assert_eq!(fields.position.as_deref(), Some(""));
        assert_eq!(fields.hire_date.as_deref(), Some("2023-01-15"));
        assert_eq!(fields.name, None);
    }

    #[test]
    fn omitted_flags_keep_prepopulated_values() {
        let employee = shared::domain::Employee {
            id: EmployeeId(4),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone: None,
            department: None,
            position: Some("Analyst".to_string()),
            salary: None,
            hire_date: None,
        };
        let mut form = EmployeeForm::edit(&employee);
        FieldArgs {
            position: Some(String::new()),
            salary: Some("120".to_string()),
            ..FieldArgs::default()
        }
        .apply(&mut form);

        assert_eq!(form.values().name, "Ada");
        assert_eq!(form.values().position, "");
        assert_eq!(form.values().salary, "120");
    }

    #[tokio::test]
    async fn fetch_failure_keeps_the_client_error() {
        std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);
        let api = HttpEmployeeApi::new(format!("http://{addr}/api"));

        let err = fetch_employee(&api, EmployeeId(7))
            .await
            .expect_err("backend is down");

        assert_eq!(err.to_string(), "failed to fetch employee #7");
        assert!(matches!(
            err.downcast_ref::<ClientError>(),
            Some(ClientError::Network { .. })
        ));
    }

    #[test]
    fn confirmation_accepts_only_yes() {
        let mut output = Vec::new();
        assert!(confirm("Delete?", &mut "y\n".as_bytes(), &mut output).expect("confirm"));
        assert!(confirm("Delete?", &mut "YES\n".as_bytes(), &mut output).expect("confirm"));
        assert!(!confirm("Delete?", &mut "\n".as_bytes(), &mut output).expect("confirm"));
        assert!(!confirm("Delete?", &mut "nope\n".as_bytes(), &mut output).expect("confirm"));
        assert!(String::from_utf8(output)
            .expect("utf8")
            .starts_with("Delete? [y/N] "));
    }
}
