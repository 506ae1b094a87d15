use std::fmt::Write;
use tripwise_booking::{BookingWizard, Stage, StepStatus};
use tripwise_core::{AssistanceOption, Field, GuestKind, Trip};

pub fn login(error: Option<&str>) -> String {
    let mut out = String::from("== Travel Trip ==\nSign in with: login <username> <password>\n");
    if let Some(error) = error {
        let _ = writeln!(out, "! {}", error);
    }
    out
}

pub fn home() -> String {
    "== Travel Trip ==\n`go /book-a-new-trip` to book a trip, `go /my-trips` to see your trips, `logout` to sign out.\n"
        .to_string()
}

pub fn not_found() -> String {
    "== Page Not Found ==\nWe are sorry, the page you requested could not be found. `go /` to return home.\n".to_string()
}

pub fn trips(trips: &[Trip]) -> String {
    if trips.is_empty() {
        return "== My Trips ==\nNo upcoming trips.\nWhen you book a trip, you will see your trip details here.\n`go /book-a-new-trip` to book a new trip.\n"
            .to_string();
    }

    let mut out = String::from("== My Trips ==\n");
    for trip in trips {
        let _ = writeln!(
            out,
            "{}  Date: {} to {}  [cancel-trip {}]",
            trip.draft.end_location,
            show_date(trip.draft.start_date),
            show_date(trip.draft.end_date),
            trip.id
        );
    }
    out
}

fn show_date(date: Option<chrono::NaiveDate>) -> String {
    date.map(|d| d.to_string()).unwrap_or_default()
}

fn step_list(wizard: &BookingWizard) -> String {
    let mut out = String::new();
    for stage in Stage::ALL {
        let marker = match wizard.step_status(stage) {
            StepStatus::Completed => "[✓]".to_string(),
            StepStatus::Active => format!("[{}]", stage.index() + 1),
            StepStatus::Pending => format!(" {} ", stage.index() + 1),
        };
        let _ = writeln!(out, "{} {}", marker, stage.title());
    }
    out
}

fn line(out: &mut String, wizard: &BookingWizard, label: &str, field: Field, value: &str) {
    let _ = writeln!(out, "  {}: {}", label, value);
    if let Some(error) = wizard.state().error(field) {
        let _ = writeln!(out, "    ! {}", error);
    }
}

pub fn wizard(wizard: &BookingWizard) -> String {
    let mut out = step_list(wizard);
    out.push('\n');

    if wizard.is_confirmed() {
        out.push_str("✓ Confirmed\nYour trip has been booked successfully.\n`trips` to view your trips, `new` to book another.\n");
        return out;
    }

    let draft = wizard.draft();
    match wizard.stage() {
        Stage::Details => {
            line(&mut out, wizard, "Name", Field::Name, &draft.name);
            line(&mut out, wizard, "Start Location", Field::StartLocation, &draft.start_location);
            line(&mut out, wizard, "End Location", Field::EndLocation, &draft.end_location);
            out.push_str("`set <field> <value>`, then `next`\n");
        }
        Stage::Dates => {
            line(&mut out, wizard, "Start Date", Field::StartDate, &show_date(draft.start_date));
            line(&mut out, wizard, "End Date", Field::EndDate, &show_date(draft.end_date));
            out.push_str("`set startDate YYYY-MM-DD`, `set endDate YYYY-MM-DD`, then `prev` or `next`\n");
        }
        Stage::Guests => {
            for (kind, label) in [
                (GuestKind::Adults, "Adults"),
                (GuestKind::Children, "Children"),
                (GuestKind::Infants, "Infants"),
            ] {
                let _ = writeln!(out, "  {}: {}", label, draft.guests(kind));
            }
            out.push_str("`inc <guest>` / `dec <guest>`, then `prev` or `next`\n");
        }
        Stage::Assistance => {
            let needed = if draft.travel_assistance { "yes" } else { "no" };
            let _ = writeln!(out, "  Travel assistance needed: {}", needed);
            if draft.travel_assistance {
                let choice = draft.assistance_option.map(|o| o.to_string()).unwrap_or_default();
                let options: Vec<&str> = AssistanceOption::ALL.iter().map(AssistanceOption::as_str).collect();
                line(
                    &mut out,
                    wizard,
                    &format!("Assistance Options ({})", options.join("/")),
                    Field::AssistanceOption,
                    &choice,
                );
            }
            out.push_str("`set travelAssistance yes|no`, `set assistanceOption <option>`, then `prev` or `next`\n");
        }
        Stage::Confirm => {
            let _ = writeln!(out, "  Name: {}", draft.name);
            let _ = writeln!(out, "  Start Location: {}", draft.start_location);
            let _ = writeln!(out, "  End Location: {}", draft.end_location);
            let _ = writeln!(out, "  Start Date: {}", show_date(draft.start_date));
            let _ = writeln!(out, "  End Date: {}", show_date(draft.end_date));
            let _ = writeln!(out, "  Guests: {}", draft.guests_summary());
            let _ = writeln!(out, "  Travel Assistance: {}", draft.assistance_summary());
            out.push_str("`confirm` or `cancel`\n");
        }
    }
    out
}
