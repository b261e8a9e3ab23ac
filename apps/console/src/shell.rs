//! # Interactive Shell
//!
//! A line-oriented front-end over the same commands the CLI uses.
//!
//! ```text
//! rentdesk:vehicles> page rentals
//! rentdesk:rentals> new
//! rentdesk:rentals [new rental]> set vehicle_id 3
//! rentdesk:rentals [new rental]> set start_date 01/01/2024
//! estimate: 50.00   ( 1 days @ 50.00 )
//! rentdesk:rentals [new rental]> save
//! saved (new rental) as id 12
//! ```
//!
//! State lives in [`AppState`] (page and selection) and in the open form. A
//! failed save leaves the form open with everything the operator typed.

use std::io::{BufRead, Write};

use rentdesk_core::validation::{CustomerForm, VehicleForm};
use rentdesk_core::dates;
use rentdesk_db::RecordStore;
use tracing::debug;

use crate::commands::{customer, rental, vehicle};
use crate::error::ApiError;
use crate::render;
use crate::state::{AppState, ConfigState, Page, RentalField, RentalFormState};

const HELP: &str = "\
commands:
  page <vehicles|customers|rentals>   switch table (clears selection)
  list                                show the current table
  select <id>                         select a row
  show                                show the selected row
  new                                 open an empty form
  edit                                open the selected row in a form
  set <field> <value>                 fill a form field
  form                                show the open form
  save                                save the open form
  cancel                              close the form without saving
  delete                              delete the selected row
  normalize <date>                    show a date as YYYY-MM-DD
  help                                this text
  quit                                leave";

/// The form currently open, if any.
#[derive(Debug, Clone)]
enum OpenForm {
    Vehicle {
        editing: Option<i64>,
        form: VehicleForm,
    },
    Customer {
        editing: Option<i64>,
        form: CustomerForm,
    },
    Rental(RentalFormState),
}

impl OpenForm {
    fn editing(&self) -> Option<i64> {
        match self {
            OpenForm::Vehicle { editing, .. } | OpenForm::Customer { editing, .. } => *editing,
            OpenForm::Rental(state) => state.editing,
        }
    }

    fn label(&self) -> String {
        let kind = match self {
            OpenForm::Vehicle { .. } => "vehicle",
            OpenForm::Customer { .. } => "customer",
            OpenForm::Rental(_) => "rental",
        };
        match self.editing() {
            Some(id) => format!("edit {} {}", kind, id),
            None => format!("new {}", kind),
        }
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        match self {
            OpenForm::Vehicle { form, .. } => vec![
                ("reg_no", form.reg_no.clone()),
                ("make", form.make.clone()),
                ("model", form.model.clone()),
                ("year", form.year.clone()),
                ("rate_per_day", form.rate_per_day.clone()),
            ],
            OpenForm::Customer { form, .. } => vec![
                ("name", form.name.clone()),
                ("phone", form.phone.clone()),
                ("email", form.email.clone()),
            ],
            OpenForm::Rental(state) => RentalField::ALL
                .iter()
                .map(|f| (f.as_str(), state.value(*f).to_string()))
                .collect(),
        }
    }
}

const VEHICLE_FIELDS: &str = "reg_no, make, model, year, rate_per_day";
const CUSTOMER_FIELDS: &str = "name, phone, email";

fn unknown_field(field: &str, known: &str) -> ApiError {
    ApiError::validation(format!("Unknown field '{}' ({})", field, known))
}

fn parse_id(arg: &str) -> Result<i64, ApiError> {
    arg.trim()
        .parse()
        .map_err(|_| ApiError::validation(format!("'{}' is not a record id", arg.trim())))
}

/// What the loop should do after a line.
enum Flow {
    Continue,
    Quit,
}

/// Interactive session state.
pub struct Shell<'a> {
    store: &'a dyn RecordStore,
    config: &'a ConfigState,
    view: AppState,
    form: Option<OpenForm>,
}

impl<'a> Shell<'a> {
    pub fn new(store: &'a dyn RecordStore, config: &'a ConfigState) -> Self {
        Shell {
            store,
            config,
            view: AppState::new(),
            form: None,
        }
    }

    pub fn view(&self) -> &AppState {
        &self.view
    }

    fn prompt(&self) -> String {
        match &self.form {
            Some(form) => format!("rentdesk:{} [{}]> ", self.view.page(), form.label()),
            None => format!("rentdesk:{}> ", self.view.page()),
        }
    }

    /// Reads commands until `quit` or end of input.
    pub async fn run<R, W>(&mut self, input: R, out: &mut W) -> Result<(), ApiError>
    where
        R: BufRead,
        W: Write,
    {
        emit(out, "Type 'help' for commands.")?;
        let mut lines = input.lines();

        loop {
            write!(out, "{}", self.prompt()).map_err(io_error)?;
            out.flush().map_err(io_error)?;

            let line = match lines.next() {
                Some(line) => line.map_err(io_error)?,
                None => break,
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            debug!(line, "Shell command");
            match self.dispatch(line).await {
                Ok((Flow::Quit, _)) => break,
                Ok((Flow::Continue, text)) => {
                    if !text.is_empty() {
                        emit(out, &text)?;
                    }
                }
                Err(err) => emit(out, &format!("error: {}", err))?,
            }
        }

        Ok(())
    }

    async fn dispatch(&mut self, line: &str) -> Result<(Flow, String), ApiError> {
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((c, r)) => (c, r.trim()),
            None => (line, ""),
        };

        let text = match command.to_lowercase().as_str() {
            "quit" | "exit" => return Ok((Flow::Quit, String::new())),
            "help" => HELP.to_string(),
            "page" => {
                let page: Page = rest.parse()?;
                self.view.show(page);
                self.list().await?
            }
            "list" => self.list().await?,
            "select" => {
                let id = parse_id(rest)?;
                self.show_record(id).await?;
                self.view.select(id);
                format!("selected {} {}", self.view.page(), id)
            }
            "show" => {
                let id = self.view.require_selection()?;
                self.show_record(id).await?
            }
            "new" => self.open_new(),
            "edit" => self.open_edit().await?,
            "set" => self.set(rest).await?,
            "form" => self.describe_form()?,
            "save" => self.save().await?,
            "cancel" => match self.form.take() {
                Some(form) => format!("discarded {}", form.label()),
                None => "no form open".to_string(),
            },
            "delete" => self.delete().await?,
            "normalize" => match dates::normalize_date(rest)? {
                Some(iso) => iso,
                None => String::new(),
            },
            other => {
                return Err(ApiError::validation(format!(
                    "Unknown command '{}'; type 'help'",
                    other
                )))
            }
        };

        Ok((Flow::Continue, text))
    }

    async fn list(&self) -> Result<String, ApiError> {
        Ok(match self.view.page() {
            Page::Vehicles => render::vehicles(&vehicle::list(self.store).await?, self.config),
            Page::Customers => render::customers(&customer::list(self.store).await?),
            Page::Rentals => render::rentals(&rental::list(self.store).await?, self.config),
        })
    }

    async fn show_record(&self, id: i64) -> Result<String, ApiError> {
        match self.view.page() {
            Page::Vehicles => render::json(&vehicle::get(self.store, id).await?),
            Page::Customers => render::json(&customer::get(self.store, id).await?),
            Page::Rentals => render::json(&rental::get(self.store, id).await?),
        }
    }

    fn open_new(&mut self) -> String {
        let form = match self.view.page() {
            Page::Vehicles => OpenForm::Vehicle {
                editing: None,
                form: VehicleForm::default(),
            },
            Page::Customers => OpenForm::Customer {
                editing: None,
                form: CustomerForm::default(),
            },
            Page::Rentals => OpenForm::Rental(RentalFormState::new()),
        };
        let label = form.label();
        self.form = Some(form);
        format!("opened {}", label)
    }

    async fn open_edit(&mut self) -> Result<String, ApiError> {
        let id = self.view.require_selection()?;
        let form = match self.view.page() {
            Page::Vehicles => OpenForm::Vehicle {
                editing: Some(id),
                form: VehicleForm::from(&vehicle::get(self.store, id).await?),
            },
            Page::Customers => OpenForm::Customer {
                editing: Some(id),
                form: CustomerForm::from(&customer::get(self.store, id).await?),
            },
            Page::Rentals => {
                let mut state = RentalFormState::from_rental(&rental::get(self.store, id).await?);
                state.refresh_quote(self.store).await;
                OpenForm::Rental(state)
            }
        };
        self.form = Some(form);
        self.describe_form()
    }

    async fn set(&mut self, rest: &str) -> Result<String, ApiError> {
        let (field, value) = match rest.split_once(char::is_whitespace) {
            Some((f, v)) => (f, v.trim()),
            None => (rest, ""),
        };
        let store = self.store;
        let form = self
            .form
            .as_mut()
            .ok_or_else(|| ApiError::validation("No form open; use 'new' or 'edit'"))?;

        match form {
            OpenForm::Vehicle { form: f, .. } => {
                let slot = match field {
                    "reg_no" => &mut f.reg_no,
                    "make" => &mut f.make,
                    "model" => &mut f.model,
                    "year" => &mut f.year,
                    "rate_per_day" => &mut f.rate_per_day,
                    _ => return Err(unknown_field(field, VEHICLE_FIELDS)),
                };
                *slot = value.to_string();
                Ok(String::new())
            }
            OpenForm::Customer { form: f, .. } => {
                let slot = match field {
                    "name" => &mut f.name,
                    "phone" => &mut f.phone,
                    "email" => &mut f.email,
                    _ => return Err(unknown_field(field, CUSTOMER_FIELDS)),
                };
                *slot = value.to_string();
                Ok(String::new())
            }
            OpenForm::Rental(state) => {
                let field: RentalField = field.parse()?;
                state.set_field(store, field, value).await;
                Ok(format!("estimate: {}", state.quote_text()))
            }
        }
    }

    fn describe_form(&self) -> Result<String, ApiError> {
        let form = self
            .form
            .as_ref()
            .ok_or_else(|| ApiError::validation("No form open; use 'new' or 'edit'"))?;

        let mut lines: Vec<String> = form
            .fields()
            .into_iter()
            .map(|(name, value)| format!("  {:<22} {}", name, value))
            .collect();
        if let OpenForm::Rental(state) = form {
            lines.push(format!("  {:<22} {}", "estimate", state.quote_text()));
        }
        Ok(format!("{}\n{}", form.label(), lines.join("\n")))
    }

    async fn save(&mut self) -> Result<String, ApiError> {
        let form = self
            .form
            .as_ref()
            .ok_or_else(|| ApiError::validation("No form open; use 'new' or 'edit'"))?;

        let id = match form {
            OpenForm::Vehicle { editing, form } => vehicle::save(self.store, *editing, form).await?,
            OpenForm::Customer { editing, form } => {
                customer::save(self.store, *editing, form).await?
            }
            OpenForm::Rental(state) => rental::save(self.store, state.editing, &state.form).await?,
        };

        let label = form.label();
        self.form = None;
        self.view.select(id);
        Ok(format!("saved ({}) as id {}\n{}", label, id, self.list().await?))
    }

    async fn delete(&mut self) -> Result<String, ApiError> {
        let id = self.view.require_selection()?;
        let page = self.view.page();

        let report = match page {
            Page::Vehicles => vehicle::delete(self.store, id).await?,
            Page::Customers => customer::delete(self.store, id).await?,
            Page::Rentals => rental::delete(self.store, id).await?,
        };

        self.view.clear_selection();
        Ok(format!(
            "deleted {} {} ({} rentals removed, {} vehicles released)\n{}",
            page,
            id,
            report.rentals_deleted,
            report.vehicles_released,
            self.list().await?
        ))
    }
}

fn io_error(e: std::io::Error) -> ApiError {
    ApiError::internal(format!("Terminal I/O failed: {}", e))
}

fn emit<W: Write>(out: &mut W, text: &str) -> Result<(), ApiError> {
    writeln!(out, "{}", text).map_err(io_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rentdesk_db::{Database, DbConfig};

    async fn run_script(db: &Database, script: &str) -> (String, AppState) {
        let config = ConfigState::default();
        let mut shell = Shell::new(db, &config);
        let mut out = Vec::new();
        shell.run(script.as_bytes(), &mut out).await.unwrap();
        (String::from_utf8(out).unwrap(), shell.view().clone())
    }

    #[tokio::test]
    async fn test_full_rental_session() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let script = "\
new
set reg_no KA-01-1234
set make Toyota
set model Corolla
set year 2020
set rate_per_day 50
save
page customers
new
set name Asha
set phone 98450
set email asha@example.com
save
page rentals
new
set vehicle_id 1
set customer_id 1
set start_date 01/01/2024
set expected_return_date 2024-01-03
save
page vehicles
quit
";
        let (out, view) = run_script(&db, script).await;

        assert!(out.contains("estimate: 150.00   ( 3 days @ 50.00 )"), "{}", out);
        assert!(out.contains("saved (new rental) as id 1"), "{}", out);
        assert!(out.contains("rented"), "{}", out);
        assert_eq!(view.page(), Page::Vehicles);
        assert_eq!(view.selection(), None);
    }

    #[tokio::test]
    async fn test_validation_error_keeps_form_open() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let script = "\
page rentals
new
set vehicle_id 1
set customer_id 1
set start_date 2024-01-05
set expected_return_date 2024-01-03
save
form
";
        let (out, _) = run_script(&db, script).await;

        assert!(
            out.contains("error: [VALIDATION_ERROR] expected_return_date cannot be before start_date"),
            "{}",
            out
        );
        assert!(out.contains("rentdesk:rentals [new rental]> "));
        assert!(out.contains("2024-01-05"));
    }

    #[tokio::test]
    async fn test_commands_need_selection() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let (out, _) = run_script(&db, "edit\ndelete\nselect 5\nnormalize 31-01-24\n").await;

        assert!(out.contains("error: [VALIDATION_ERROR] Select a row on vehicles first"));
        assert!(out.contains("error: [NOT_FOUND] Vehicle not found: 5"));
        assert!(out.contains("2024-01-31"));
    }
}
