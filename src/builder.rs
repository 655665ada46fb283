use crate::browser::page::{CURRICULUM_TAB, PROGRAM_COMBO, SEARCH_TAB, UNIT_COMBO};
use crate::browser::{BrowserConfig, BrowserError, BrowserManager, CareerPage};
use crate::catalog::Catalog;
use crate::config::Config;
use crate::extract;
use crate::models::{Program, Unit};
use scraper::Html;
use std::collections::BTreeSet;

/// Appearance of the first real option marks a populated dropdown;
/// option 1 is the empty placeholder.
const UNIT_POPULATED: &str = "#comboUnidade option:nth-child(2)";
const PROGRAM_POPULATED: &str = "#comboCurso option:nth-child(2)";

/// Drives the portal through every unit and program and folds the
/// extracted fragments into a [`Catalog`]. One browser session, strictly
/// sequential: the page holds a single active selection and a single
/// active tab, so there is nothing to fan out.
pub struct CatalogBuilder {
    manager: BrowserManager,
    config: Config,
}

impl CatalogBuilder {
    pub fn new(config: Config) -> Result<Self, BrowserError> {
        let manager = BrowserManager::new(BrowserConfig::from(&config.browser))?;
        Ok(Self { manager, config })
    }

    /// Run the full sweep. A timeout anywhere aborts the run; a "no
    /// results" popup is recovered locally and never escalates. The
    /// browser is released when the builder drops, whichever way this
    /// returns.
    pub fn run(&self) -> Result<Catalog, BrowserError> {
        let page = CareerPage::new(self.manager.new_tab()?, self.manager.config().clone());

        log::info!("opening career portal at {}", self.config.portal_url);
        page.navigate(&self.config.portal_url)?;
        page.wait_for_selector(UNIT_POPULATED)?;

        let document = Html::parse_document(&page.html()?);
        let unit_names = extract::list_units(&document);
        let limit = resolve_unit_limit(self.config.max_units, unit_names.len());
        log::info!("{} units available, scraping {}", unit_names.len(), limit);

        let mut catalog = Catalog::new();
        for (unit_index, unit_name) in unit_names.iter().take(limit).enumerate() {
            self.scrape_unit(&page, &mut catalog, unit_index, unit_name)?;
        }

        log::info!(
            "scrape finished: {} units, {} programs, {} courses",
            catalog.units().len(),
            catalog.program_count(),
            catalog.course_count()
        );
        Ok(catalog)
    }

    fn scrape_unit(
        &self,
        page: &CareerPage,
        catalog: &mut Catalog,
        unit_index: usize,
        unit_name: &str,
    ) -> Result<(), BrowserError> {
        let unit_ordinal = unit_index + 2;
        log::info!("unit: {}", unit_name);

        select_unit(page, unit_ordinal)?;
        let document = Html::parse_document(&page.html()?);
        let program_names = extract::list_programs(&document);

        let programs: BTreeSet<String> = program_names.iter().cloned().collect();
        match Unit::new(unit_name, programs) {
            Some(unit) => catalog.add_unit(unit),
            None => {
                log::warn!("unit name {:?} carries no acronym, skipping unit", unit_name);
                return Ok(());
            }
        }

        for (program_index, program_name) in program_names.iter().enumerate() {
            // Re-entry: the previous program left the page on a result
            // tab with its own selection. Selecting the same unit again
            // is idempotent and repopulates the program dropdown.
            if program_index > 0 {
                select_unit(page, unit_ordinal)?;
            }
            self.scrape_program(page, catalog, unit_name, program_index + 2, program_name)?;
        }

        Ok(())
    }

    fn scrape_program(
        &self,
        page: &CareerPage,
        catalog: &mut Catalog,
        unit_name: &str,
        program_ordinal: usize,
        program_name: &str,
    ) -> Result<(), BrowserError> {
        log::info!("  program: {}", program_name);

        page.select_nth_option(PROGRAM_COMBO, program_ordinal)?;
        page.submit()?;
        page.wait_until_idle()?;

        if page.check_and_dismiss_error()? {
            log::warn!(
                "portal has no data for {:?}, recording placeholder",
                program_name
            );
            catalog.add_program(Program::unavailable(program_name, unit_name));
            return Ok(());
        }

        let info_panel = Html::parse_document(&page.html()?);
        let info = extract::read_program_info(&info_panel);
        catalog.add_program(Program::new(program_name, unit_name, Some(&info)));

        page.activate_tab(CURRICULUM_TAB)?;
        page.wait_until_idle()?;

        let curriculum = Html::parse_document(&page.html()?);
        let rows = extract::read_course_rows(&curriculum);
        log::debug!("  {} curriculum rows", rows.len());
        for row in &rows {
            catalog.record_course(program_name, row);
        }

        page.activate_tab(SEARCH_TAB)?;
        page.wait_until_idle()?;
        Ok(())
    }
}

fn select_unit(page: &CareerPage, unit_ordinal: usize) -> Result<(), BrowserError> {
    page.select_nth_option(UNIT_COMBO, unit_ordinal)?;
    page.wait_for_selector(PROGRAM_POPULATED)
}

/// Clamp the configured unit count: zero or out-of-range means all units.
fn resolve_unit_limit(requested: usize, total: usize) -> usize {
    if requested == 0 {
        return total;
    }
    if requested > total {
        log::warn!(
            "{} units requested but only {} exist, scraping all of them",
            requested,
            total
        );
        return total;
    }
    requested
}
