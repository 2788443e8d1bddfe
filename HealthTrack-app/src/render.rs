//! Plain-text rendering of the screens for the console host

use healthtrack_data::models::blood_pressure::PressureReading;
use healthtrack_domain::entities::pressure::{PressureField, SaveState};
use healthtrack_domain::entities::sugar::{SelectorOption, SugarDisplay};
use healthtrack_domain::navigation::Route;
use healthtrack_domain::services::{PressureForm, SugarView, SugarViewError};

/// Lines of the pressure entry form
pub fn render_pressure(form: &PressureForm) -> Vec<String> {
    let draft = form.draft();
    let mut lines = vec!["== Add Blood Pressure ==".to_string()];

    for field in PressureField::ALL {
        let value = match field {
            PressureField::Date => draft.formatted_date.as_str(),
            PressureField::Systolic => draft.systolic.as_str(),
            PressureField::Diastolic => draft.diastolic.as_str(),
            PressureField::Notes => draft.notes.as_str(),
        };
        let marker = if form.is_label_raised(field) { "^" } else { " " };
        lines.push(format!("{} {}: {}", marker, field.label(), value));
        if let Some(error) = draft.error(field) {
            lines.push(format!("    ! {}", error));
        }
    }

    if form.is_date_picker_visible() {
        lines.push("[date picker open]".to_string());
    }

    match form.state() {
        SaveState::Idle => {}
        SaveState::Saving => lines.push("[saving...]".to_string()),
        SaveState::Success => lines.push("[saved]".to_string()),
        SaveState::Failed(reason) => {
            lines.push(format!("[save failed: {}] type 'retry' to try again", reason))
        }
    }
    lines
}

/// Lines of the sugar readings view; the inbound message is consumed
pub fn render_sugar(view: &mut SugarView) -> Result<Vec<String>, SugarViewError> {
    let mut lines = vec!["== Blood Sugar ==".to_string()];

    if let Some(message) = view.take_message() {
        lines.push(format!("* {}", message));
    }

    let options: Vec<String> = SelectorOption::ALL
        .iter()
        .map(|option| {
            if *option == view.selected() {
                format!("[{}]", option.label())
            } else {
                option.label().to_string()
            }
        })
        .collect();
    lines.push(format!("Test type: {}", options.join(" ")));

    match view.display()? {
        SugarDisplay::Empty { message } => lines.push(message.to_string()),
        SugarDisplay::Readings { chart, table } => {
            let points: Vec<String> = chart
                .labels
                .iter()
                .zip(chart.values.iter())
                .map(|(label, value)| format!("{}={}", label, value))
                .collect();
            lines.push(format!("{}: {}", chart.legend, points.join(", ")));

            lines.push(table.headers.join(" | "));
            for row in table.rows {
                let shade = if row.alternate { "#" } else { " " };
                lines.push(format!("{} {} | {} | {}", shade, row.date, row.test_type, row.value));
            }
        }
    }
    Ok(lines)
}

/// Lines of a screen the host only names, such as the pressure readings list
pub fn render_placeholder(
    route: Route,
    message: Option<&str>,
    readings: &[PressureReading],
) -> Result<Vec<String>, serde_json::Error> {
    let mut lines = vec![format!("== {} ==", route)];
    if let Some(message) = message {
        lines.push(format!("* {}", message));
    }
    for reading in readings {
        lines.push(serde_json::to_string(reading)?);
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use healthtrack_data::repository::FixedSugarReadings;
    use healthtrack_domain::entities::sugar::SugarVariant;
    use healthtrack_domain::services::SimulatedSaver;
    use healthtrack_domain::testing::RecordingNavigator;
    use std::sync::Arc;

    #[test]
    fn test_pressure_errors_rendered_under_field() {
        let mut form = PressureForm::mount(
            Arc::new(SimulatedSaver::default()),
            Arc::new(RecordingNavigator::new()),
        );
        form.set_systolic("400");
        form.set_diastolic("80");
        form.validate();

        let lines = render_pressure(&form);
        let systolic = lines.iter().position(|l| l.contains("Systolic (mmHg): 400")).unwrap();
        assert!(lines[systolic + 1].contains("range of >=30 to <=305"));
    }

    #[test]
    fn test_sugar_render_consumes_message() {
        let mut view = SugarView::mount(
            Arc::new(FixedSugarReadings),
            Arc::new(RecordingNavigator::new()),
            Some("welcome back".to_string()),
        );
        view.select(SelectorOption::Variant(SugarVariant::Fasting));

        let first = render_sugar(&mut view).unwrap();
        assert!(first.contains(&"* welcome back".to_string()));
        assert!(first.contains(&"Test type: Select Random [Fasting]".to_string()));
        assert!(first.contains(&"# 03-Oct-2024 | Fasting | 80".to_string()));

        let second = render_sugar(&mut view).unwrap();
        assert!(!second.iter().any(|l| l.contains("welcome back")));
    }

    #[test]
    fn test_placeholder_lists_readings_as_json() {
        let reading = PressureReading {
            id: "r1".to_string(),
            systolic: 120,
            diastolic: 80,
            notes: None,
            timestamp: "2024-10-01T14:05:00+00:00".to_string(),
        };
        let lines = render_placeholder(Route::PressureReadings, Some("ok"), &[reading]).unwrap();
        assert_eq!(lines[0], "== pressure ==");
        assert_eq!(lines[1], "* ok");
        assert!(lines[2].contains("\"systolic\":120"));
    }
}
