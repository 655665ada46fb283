use regex::Regex;
use std::collections::BTreeSet;
use std::fmt;

/// Fallback text for fields the portal left empty.
pub const NOT_AVAILABLE: &str = "N/A";

/// Trim a scraped field, substituting the `N/A` fallback when empty.
pub fn or_not_available(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Classification of a course inside a specific program's curriculum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequirementCategory {
    Mandatory,
    FreeElective,
    RestrictedElective,
}

impl RequirementCategory {
    /// Match a curriculum section label by its last whitespace-delimited
    /// token, lowercased. The portal renders headers such as
    /// "Disciplinas Obrigatórias" and "Disciplinas Optativas Eletivas".
    pub fn from_label(label: &str) -> Option<Self> {
        let token = label.split_whitespace().last()?.to_lowercase();
        match token.as_str() {
            "obrigatórias" => Some(Self::Mandatory),
            "livres" => Some(Self::FreeElective),
            "eletivas" => Some(Self::RestrictedElective),
            _ => None,
        }
    }
}

/// A degree-granting organizational unit and the program names it offers.
#[derive(Debug, Clone)]
pub struct Unit {
    pub name: String,
    pub acronym: String,
    pub programs: BTreeSet<String>,
}

impl Unit {
    /// Build a unit from its display name. The acronym is the first
    /// parenthesized substring of the name; a name without one is rejected.
    pub fn new(name: &str, programs: BTreeSet<String>) -> Option<Self> {
        let re = Regex::new(r"\(([^)]+)\)").ok()?;
        let acronym = re.captures(name)?.get(1)?.as_str().trim().to_string();
        if acronym.is_empty() {
            return None;
        }
        Some(Self {
            name: name.trim().to_string(),
            acronym,
            programs,
        })
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "Cursos da {}:", self.acronym)?;
        for program in &self.programs {
            writeln!(f, "\t{}", program)?;
        }
        Ok(())
    }
}

/// Duration fields read from a program's info panel.
#[derive(Debug, Clone, Default)]
pub struct ProgramInfo {
    pub ideal_duration: String,
    pub min_duration: String,
    pub max_duration: String,
}

/// A degree program and its per-category course requirements.
#[derive(Debug, Clone)]
pub struct Program {
    pub name: String,
    pub unit: String,
    pub ideal_duration: String,
    pub min_duration: String,
    pub max_duration: String,
    pub mandatory: BTreeSet<String>,
    pub free_elective: BTreeSet<String>,
    pub restricted_elective: BTreeSet<String>,
}

impl Program {
    pub fn new(name: &str, unit: &str, info: Option<&ProgramInfo>) -> Self {
        let (ideal, min, max) = match info {
            Some(info) => (
                or_not_available(&info.ideal_duration),
                or_not_available(&info.min_duration),
                or_not_available(&info.max_duration),
            ),
            None => (
                NOT_AVAILABLE.to_string(),
                NOT_AVAILABLE.to_string(),
                NOT_AVAILABLE.to_string(),
            ),
        };
        Self {
            name: name.trim().to_string(),
            unit: unit.to_string(),
            ideal_duration: ideal,
            min_duration: min,
            max_duration: max,
            mandatory: BTreeSet::new(),
            free_elective: BTreeSet::new(),
            restricted_elective: BTreeSet::new(),
        }
    }

    /// Placeholder for a program whose server-side lookup failed: the
    /// program still exists in the catalog, with nothing loaded.
    pub fn unavailable(name: &str, unit: &str) -> Self {
        Self::new(name, unit, None)
    }

    pub fn add_course(&mut self, category: RequirementCategory, code: &str) {
        self.requirement_set_mut(category).insert(code.to_string());
    }

    pub fn requirement_set(&self, category: RequirementCategory) -> &BTreeSet<String> {
        match category {
            RequirementCategory::Mandatory => &self.mandatory,
            RequirementCategory::FreeElective => &self.free_elective,
            RequirementCategory::RestrictedElective => &self.restricted_elective,
        }
    }

    fn requirement_set_mut(&mut self, category: RequirementCategory) -> &mut BTreeSet<String> {
        match category {
            RequirementCategory::Mandatory => &mut self.mandatory,
            RequirementCategory::FreeElective => &mut self.free_elective,
            RequirementCategory::RestrictedElective => &mut self.restricted_elective,
        }
    }
}

fn write_course_section(
    f: &mut fmt::Formatter<'_>,
    title: &str,
    codes: &BTreeSet<String>,
) -> fmt::Result {
    writeln!(f, "{}:", title)?;
    if codes.is_empty() {
        writeln!(f, "\t{}", NOT_AVAILABLE)?;
    } else {
        for code in codes {
            writeln!(f, "\t{}", code)?;
        }
    }
    Ok(())
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Unidade: {}", self.unit)?;
        writeln!(f, "Curso: {}", self.name)?;
        writeln!(f, "Duração Ideal: {}", self.ideal_duration)?;
        writeln!(f, "Duração Mínima: {}", self.min_duration)?;
        writeln!(f, "Duração Máxima: {}", self.max_duration)?;
        writeln!(f)?;
        write_course_section(f, "Disciplinas Obrigatórias", &self.mandatory)?;
        write_course_section(f, "Disciplinas Optativas Livres", &self.free_elective)?;
        write_course_section(f, "Disciplinas Optativas Eletivas", &self.restricted_elective)?;
        Ok(())
    }
}

/// One curriculum table row as rendered by the portal, before folding
/// into the catalog. All fields are kept as text; the page frequently
/// leaves cells blank.
#[derive(Debug, Clone)]
pub struct CourseRow {
    pub category: RequirementCategory,
    pub code: String,
    pub name: String,
    pub lecture_credits: String,
    pub work_credits: String,
    pub hours: String,
    pub internship_hours: String,
    pub practicum_hours: String,
    pub advanced_hours: String,
}

/// A catalog-wide course, shared across every program whose curriculum
/// lists its code.
#[derive(Debug, Clone)]
pub struct Course {
    pub code: String,
    pub name: String,
    pub lecture_credits: String,
    pub work_credits: String,
    pub hours: String,
    pub internship_hours: String,
    pub practicum_hours: String,
    pub advanced_hours: String,
    pub programs: BTreeSet<String>,
}

impl Course {
    pub fn from_row(row: &CourseRow) -> Self {
        Self {
            code: row.code.clone(),
            name: row.name.clone(),
            lecture_credits: row.lecture_credits.clone(),
            work_credits: row.work_credits.clone(),
            hours: row.hours.clone(),
            internship_hours: row.internship_hours.clone(),
            practicum_hours: row.practicum_hours.clone(),
            advanced_hours: row.advanced_hours.clone(),
            programs: BTreeSet::new(),
        }
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Código: {}", self.code)?;
        writeln!(f, "Nome: {}", self.name)?;
        writeln!(f, "Créditos Aula: {}", self.lecture_credits)?;
        writeln!(f, "Créditos Trabalho: {}", self.work_credits)?;
        writeln!(f, "Carga Horária: {}", self.hours)?;
        writeln!(f, "Carga Horária Estágio: {}", self.internship_hours)?;
        writeln!(f, "Carga Horária PCC: {}", self.practicum_hours)?;
        writeln!(f, "Atividades TPA: {}", self.advanced_hours)?;
        writeln!(f, "Cursos:")?;
        for program in &self.programs {
            writeln!(f, "\t{}", program)?;
        }
        Ok(())
    }
}
