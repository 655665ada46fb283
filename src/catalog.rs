use crate::models::{Course, CourseRow, Program, Unit};
use std::collections::BTreeMap;

/// In-memory aggregate built over one scraping session: units in page
/// order, programs keyed by name, courses keyed by code. The builder owns
/// it mutably while the run lasts; the query shell only reads it.
#[derive(Debug, Default)]
pub struct Catalog {
    units: Vec<Unit>,
    programs: BTreeMap<String, Program>,
    courses: BTreeMap<String, Course>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_unit(&mut self, unit: Unit) {
        if self.units.iter().any(|u| u.name == unit.name) {
            return;
        }
        self.units.push(unit);
    }

    pub fn add_program(&mut self, program: Program) {
        self.programs.entry(program.name.clone()).or_insert(program);
    }

    /// Fold one curriculum row into the catalog. A code already present
    /// only gains the referencing program; its fields are never re-parsed.
    pub fn record_course(&mut self, program_name: &str, row: &CourseRow) {
        let course = self
            .courses
            .entry(row.code.clone())
            .or_insert_with(|| Course::from_row(row));
        course.programs.insert(program_name.to_string());

        if let Some(program) = self.programs.get_mut(program_name) {
            program.add_course(row.category, &row.code);
        } else {
            log::warn!(
                "curriculum row for {} references unknown program {}",
                row.code,
                program_name
            );
        }
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn unit_by_acronym(&self, acronym: &str) -> Option<&Unit> {
        self.units
            .iter()
            .find(|u| u.acronym.eq_ignore_ascii_case(acronym))
    }

    pub fn program(&self, name: &str) -> Option<&Program> {
        self.programs.get(name)
    }

    pub fn course_by_code(&self, code: &str) -> Option<&Course> {
        self.courses.get(code)
    }

    pub fn course_by_name(&self, name: &str) -> Option<&Course> {
        self.courses.values().find(|c| c.name == name)
    }

    /// Courses listed by more than one program.
    pub fn shared_courses(&self) -> Vec<&Course> {
        self.courses
            .values()
            .filter(|c| c.programs.len() > 1)
            .collect()
    }

    pub fn program_names(&self) -> impl Iterator<Item = &String> {
        self.programs.keys()
    }

    pub fn course_names(&self) -> impl Iterator<Item = &String> {
        self.courses.values().map(|c| &c.name)
    }

    pub fn program_count(&self) -> usize {
        self.programs.len()
    }

    pub fn course_count(&self) -> usize {
        self.courses.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProgramInfo, RequirementCategory};
    use std::collections::BTreeSet;

    fn row(code: &str, category: RequirementCategory) -> CourseRow {
        CourseRow {
            category,
            code: code.to_string(),
            name: format!("Disciplina {}", code),
            lecture_credits: "4".to_string(),
            work_credits: "1".to_string(),
            hours: "90".to_string(),
            internship_hours: "N/A".to_string(),
            practicum_hours: "N/A".to_string(),
            advanced_hours: "N/A".to_string(),
        }
    }

    #[test]
    fn test_course_dedup_is_idempotent() {
        let mut catalog = Catalog::new();
        catalog.add_program(Program::unavailable("Curso A", "Escola de Exemplo (EE)"));
        catalog.add_program(Program::unavailable("Curso B", "Escola de Exemplo (EE)"));

        catalog.record_course("Curso A", &row("MAT001", RequirementCategory::Mandatory));
        let mut second = row("MAT001", RequirementCategory::Mandatory);
        second.name = "Nome Diferente".to_string();
        catalog.record_course("Curso B", &second);

        assert_eq!(catalog.course_count(), 1);
        let course = catalog.course_by_code("MAT001").unwrap();
        assert_eq!(course.programs.len(), 2);
        // first-seen fields win
        assert_eq!(course.name, "Disciplina MAT001");
    }

    #[test]
    fn test_shared_course_lands_in_each_programs_category() {
        let mut catalog = Catalog::new();
        let programs: BTreeSet<String> =
            ["Curso A", "Curso B"].iter().map(|s| s.to_string()).collect();
        catalog.add_unit(Unit::new("Escola de Exemplo (EE)", programs).unwrap());
        catalog.add_program(Program::unavailable("Curso A", "Escola de Exemplo (EE)"));
        catalog.add_program(Program::unavailable("Curso B", "Escola de Exemplo (EE)"));

        catalog.record_course("Curso A", &row("MAT001", RequirementCategory::Mandatory));
        catalog.record_course(
            "Curso B",
            &row("MAT001", RequirementCategory::RestrictedElective),
        );

        let course = catalog.course_by_code("MAT001").unwrap();
        let expected: BTreeSet<String> =
            ["Curso A", "Curso B"].iter().map(|s| s.to_string()).collect();
        assert_eq!(course.programs, expected);

        let a = catalog.program("Curso A").unwrap();
        assert!(a.mandatory.contains("MAT001"));
        assert!(a.restricted_elective.is_empty());

        let b = catalog.program("Curso B").unwrap();
        assert!(b.restricted_elective.contains("MAT001"));
        assert!(b.mandatory.is_empty());

        assert_eq!(catalog.shared_courses().len(), 1);
    }

    #[test]
    fn test_requirement_sets_stay_disjoint() {
        let mut catalog = Catalog::new();
        catalog.add_program(Program::unavailable("Curso A", "Escola de Exemplo (EE)"));
        catalog.record_course("Curso A", &row("MAT001", RequirementCategory::Mandatory));
        catalog.record_course("Curso A", &row("FIS001", RequirementCategory::FreeElective));
        catalog.record_course(
            "Curso A",
            &row("QUI001", RequirementCategory::RestrictedElective),
        );

        let program = catalog.program("Curso A").unwrap();
        assert!(program.mandatory.is_disjoint(&program.free_elective));
        assert!(program.mandatory.is_disjoint(&program.restricted_elective));
        assert!(program.free_elective.is_disjoint(&program.restricted_elective));
    }

    #[test]
    fn test_failed_lookup_still_yields_program_entry() {
        let mut catalog = Catalog::new();
        catalog.add_program(Program::unavailable("Curso Sem Dados", "Escola (E)"));

        let program = catalog.program("Curso Sem Dados").unwrap();
        assert_eq!(program.ideal_duration, "N/A");
        assert!(program.mandatory.is_empty());
        assert!(program.free_elective.is_empty());
        assert!(program.restricted_elective.is_empty());
    }

    #[test]
    fn test_add_program_keeps_first_entry() {
        let mut catalog = Catalog::new();
        let info = ProgramInfo {
            ideal_duration: "8".to_string(),
            min_duration: "6".to_string(),
            max_duration: "12".to_string(),
        };
        catalog.add_program(Program::new("Curso A", "Escola (E)", Some(&info)));
        catalog.add_program(Program::unavailable("Curso A", "Escola (E)"));

        assert_eq!(catalog.program_count(), 1);
        assert_eq!(catalog.program("Curso A").unwrap().ideal_duration, "8");
    }

    #[test]
    fn test_unit_registration_ignores_revisit() {
        let mut catalog = Catalog::new();
        catalog.add_unit(Unit::new("Escola de Exemplo (EE)", BTreeSet::new()).unwrap());
        catalog.add_unit(Unit::new("Escola de Exemplo (EE)", BTreeSet::new()).unwrap());
        assert_eq!(catalog.units().len(), 1);
        assert!(catalog.unit_by_acronym("ee").is_some());
    }

    #[test]
    fn test_course_lookup_by_name() {
        let mut catalog = Catalog::new();
        catalog.add_program(Program::unavailable("Curso A", "Escola (E)"));
        catalog.record_course("Curso A", &row("MAT001", RequirementCategory::Mandatory));

        assert!(catalog.course_by_name("Disciplina MAT001").is_some());
        assert!(catalog.course_by_name("Inexistente").is_none());
    }
}
