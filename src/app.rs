//! Application flow.
//!
//! [`App`] walks one [`PlotSession`] from the data menu to `Ready`, asking
//! every question through a [`Prompter`]. Recoverable errors re-ask the
//! step that produced them; anything else ends the run.

use crate::catalog::Catalog;
use crate::data::{AcquisitionMethod, DataSource, TableLoader};
use crate::error::Result;
use crate::prompt::{retry, Prompter};
use crate::session::{PlotSession, Presentation};
use rand::Rng;
use tracing::{debug, info};

/// Interactive session driver.
#[derive(Debug)]
pub struct App<P, L, R> {
    prompter: P,
    source: DataSource<L, R>,
}

impl<P: Prompter, L: TableLoader, R: Rng> App<P, L, R> {
    /// Create an app asking through `prompter` and acquiring data from `source`.
    pub fn new(prompter: P, source: DataSource<L, R>) -> Self {
        Self { prompter, source }
    }

    /// Give back the prompter.
    pub fn into_prompter(self) -> P {
        self.prompter
    }

    /// Run every stage and return the `Ready` session.
    pub fn run(&mut self) -> Result<PlotSession> {
        let mut session = PlotSession::new();
        self.acquire_data(&mut session)?;
        self.choose_plot_type(&mut session)?;
        self.choose_styles(&mut session)?;
        self.choose_colors(&mut session)?;
        self.choose_labels(&mut session)?;

        info!(
            plot_type = ?session.plot_type(),
            colors = session.colors().len(),
            "session ready"
        );
        Ok(session)
    }

    fn acquire_data(&mut self, session: &mut PlotSession) -> Result<()> {
        let method = retry(&mut self.prompter, |p| {
            p.say("Choose data input method:")?;
            for line in AcquisitionMethod::menu() {
                p.say(&line)?;
            }
            AcquisitionMethod::select(&p.ask("Enter choice (1/2/3/4): ")?)
        })?;
        debug!(?method, "acquisition method chosen");

        let dataset = self.source.acquire(method, &mut self.prompter)?;
        session.acquire(dataset)
    }

    fn choose_plot_type(&mut self, session: &mut PlotSession) -> Result<()> {
        menu_choice(
            &mut self.prompter,
            "Choose a plot type by entering the corresponding number:",
            Catalog::PlotType,
            "Enter the number corresponding to your plot type: ",
            |answer| session.choose_plot_type(answer).map(drop),
        )
    }

    fn choose_styles(&mut self, session: &mut PlotSession) -> Result<()> {
        menu_choice(
            &mut self.prompter,
            "Choose line styles:",
            Catalog::LineStyle,
            "Enter the number corresponding to your line style: ",
            |answer| session.choose_line_style(answer).map(drop),
        )?;
        menu_choice(
            &mut self.prompter,
            "Choose markers:",
            Catalog::Marker,
            "Enter the number corresponding to your marker style: ",
            |answer| session.choose_marker(answer).map(drop),
        )
    }

    fn choose_colors(&mut self, session: &mut PlotSession) -> Result<()> {
        let series = session.dataset().map_or(0, |d| d.series_count());
        let question = if series > 1 {
            format!("Enter numbers for {} colors (space-separated): ", series)
        } else {
            "Enter a number for the color of Y dataset: ".to_string()
        };
        menu_choice(
            &mut self.prompter,
            "Choose colors for Y datasets by entering the corresponding numbers:",
            Catalog::Color,
            &question,
            |answer| session.choose_colors(answer).map(drop),
        )
    }

    fn choose_labels(&mut self, session: &mut PlotSession) -> Result<()> {
        let series = session.dataset().map_or(0, |d| d.series_count());
        let mut labels = Vec::with_capacity(series);
        for i in 0..series {
            labels.push(
                self.prompter
                    .ask(&format!("Enter label for Y{} data: ", i + 1))?,
            );
        }

        let presentation = Presentation {
            title: self.prompter.ask("Enter title for the plot: ")?,
            x_label: self.prompter.ask("Enter label for X axis: ")?,
            y_label: self.prompter.ask("Enter label for Y axis: ")?,
        };
        session.choose_labels(labels, presentation)
    }
}

/// Show `heading` and the catalog menu, then ask `question` until `pick`
/// accepts the answer. The menu is shown again on every attempt.
fn menu_choice<P, F>(
    prompter: &mut P,
    heading: &str,
    catalog: Catalog,
    question: &str,
    mut pick: F,
) -> Result<()>
where
    P: Prompter + ?Sized,
    F: FnMut(&str) -> Result<()>,
{
    retry(prompter, |p| {
        p.say(heading)?;
        for line in catalog.menu() {
            p.say(&line)?;
        }
        let answer = p.ask(question)?;
        pick(&answer)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PlotType;
    use crate::data::CsvTableLoader;
    use crate::error::PlotError;
    use crate::prompt::Console;
    use crate::render::{Figure, RenderDispatcher};
    use crate::session::Stage;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Cursor;

    type TestApp = App<Console<Cursor<Vec<u8>>, Vec<u8>>, CsvTableLoader, StdRng>;

    fn app(script: &str) -> TestApp {
        App::new(
            Console::new(Cursor::new(script.as_bytes().to_vec()), Vec::new()),
            DataSource::new(CsvTableLoader::new(), StdRng::seed_from_u64(3)),
        )
    }

    fn output(app: TestApp) -> String {
        String::from_utf8(app.into_prompter().into_output()).unwrap()
    }

    #[test]
    fn manual_line_session_reaches_ready() {
        let script = "1\n1 2 3\n1\nA\n10 20 30\n1\n2\n1\n1\nRevenue\nSales\nMonth\nUSD\n";
        let mut app = app(script);
        let session = app.run().unwrap();
        assert_eq!(session.stage(), Stage::Ready);

        let plot = session.into_ready().unwrap();
        assert_eq!(plot.style.plot_type, PlotType::Line);
        assert_eq!(plot.style.line_style, "--");
        assert_eq!(plot.style.marker_style, "o");
        assert_eq!(plot.style.colors, vec!["red"]);
        assert_eq!(plot.dataset.labels(), vec!["Revenue"]);
        assert_eq!(plot.presentation.title, "Sales");
        assert_eq!(plot.presentation.x_label, "Month");
        assert_eq!(plot.presentation.y_label, "USD");

        let text = output(app);
        assert!(text.contains("1. Fill Data Manually"));
        assert!(text.contains("10: hexbin"));
        assert!(text.contains("Enter a number for the color of Y dataset: "));
    }

    #[test]
    fn bad_menu_answers_are_asked_again() {
        // method 7 and plot type 11 are out of range
        let script = "7\n2\n2\n4\n11\n2\n1\n1\n3 2\nA\nB\nT\nX\nY\n";
        let mut app = app(script);
        let session = app.run().unwrap();
        assert_eq!(session.plot_type(), Some(PlotType::Scatter));
        assert_eq!(session.colors(), &["green", "blue"]);
        assert_eq!(session.dataset().unwrap().series_count(), 2);

        let text = output(app);
        assert!(text.contains("Error: Invalid data input method selection: \"7\". Please try again."));
        assert_eq!(text.matches("Choose data input method:").count(), 2);
        assert_eq!(text.matches("Choose a plot type").count(), 2);
    }

    #[test]
    fn bad_marker_asks_only_for_the_marker() {
        // marker 11 is out of range
        let script = "1\n1 2 3\n1\nA\n10 20 30\n1\n3\n11\n4\n1\nA\nT\nX\nY\n";
        let mut app = app(script);
        let plot = app.run().unwrap().into_ready().unwrap();
        assert_eq!(plot.style.line_style, "-.");
        assert_eq!(plot.style.marker_style, "d");

        let text = output(app);
        assert_eq!(text.matches("Choose line styles:").count(), 1);
        assert_eq!(text.matches("Choose markers:").count(), 2);
        assert!(text.contains("Error: Invalid marker selection: \"11\". Please try again."));
    }

    #[test]
    fn dropped_color_fails_at_render_time() {
        // three ranged series, colors "1 2 99"
        let script =
            "3\n0\n1\n3\n3\nA\n1\n1\nB\n2\n1\nC\n3\n1\n1\n1\n1\n1 2 99\na\nb\nc\nT\nX\nY\n";
        let mut app = app(script);
        let session = app.run().unwrap();
        assert_eq!(session.colors(), &["red", "blue"]);

        let mut figure = Figure::new();
        let err = RenderDispatcher::render(session, &mut figure).unwrap_err();
        assert!(matches!(
            err,
            PlotError::IndexMismatch {
                required: 3,
                available: 2,
                ..
            }
        ));
        assert!(figure.calls().is_empty());
        assert!(!figure.was_shown());
    }

    #[test]
    fn closed_input_aborts() {
        let mut app = app("1\n1 2 3\n");
        assert!(matches!(app.run(), Err(PlotError::InputClosed)));
    }
}
