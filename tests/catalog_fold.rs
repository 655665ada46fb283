// End-to-end fold over static HTML: two programs of one unit sharing a
// course, extracted and folded exactly the way the builder does it, with
// no browser involved.

use jupiter_scraper::catalog::Catalog;
use jupiter_scraper::extract;
use jupiter_scraper::models::{Program, Unit};
use scraper::Html;
use std::collections::BTreeSet;

const UNIT_DROPDOWN: &str = r#"
    <select id="comboUnidade">
        <option value="">-- Selecione --</option>
        <option value="1">Escola de Exemplo (EE)</option>
    </select>
"#;

const PROGRAM_DROPDOWN: &str = r#"
    <select id="comboCurso">
        <option value="">-- Selecione --</option>
        <option value="10">Curso A</option>
        <option value="20">Curso B</option>
    </select>
"#;

const CURSO_A_CURRICULUM: &str = r##"
    <table>
        <tr><td colspan="8">Disciplinas Obrigatórias</td></tr>
        <tr>
            <td><a class="disciplina" href="#">MAT001</a></td>
            <td>Cálculo I</td>
            <td>4</td>
            <td>1</td>
            <td>90</td>
            <td></td>
            <td></td>
            <td></td>
        </tr>
    </table>
"##;

const CURSO_B_CURRICULUM: &str = r##"
    <table>
        <tr><td colspan="8">Disciplinas Optativas Eletivas</td></tr>
        <tr>
            <td><a class="disciplina" href="#">MAT001</a></td>
            <td>Cálculo I</td>
            <td>4</td>
            <td>1</td>
            <td>90</td>
            <td></td>
            <td></td>
            <td></td>
        </tr>
    </table>
"##;

#[test]
fn shared_course_across_two_programs() {
    let mut catalog = Catalog::new();

    let units = extract::list_units(&Html::parse_document(UNIT_DROPDOWN));
    assert_eq!(units, vec!["Escola de Exemplo (EE)"]);
    let unit_name = &units[0];

    let programs = extract::list_programs(&Html::parse_document(PROGRAM_DROPDOWN));
    assert_eq!(programs, vec!["Curso A", "Curso B"]);

    let program_set: BTreeSet<String> = programs.iter().cloned().collect();
    let unit = Unit::new(unit_name, program_set).unwrap();
    assert_eq!(unit.acronym, "EE");
    catalog.add_unit(unit);

    for (program_name, curriculum) in
        [("Curso A", CURSO_A_CURRICULUM), ("Curso B", CURSO_B_CURRICULUM)]
    {
        let document = Html::parse_document(curriculum);
        let info = extract::read_program_info(&document);
        catalog.add_program(Program::new(program_name, unit_name, Some(&info)));
        for row in extract::read_course_rows(&document) {
            catalog.record_course(program_name, &row);
        }
    }

    // one course entity, two memberships
    assert_eq!(catalog.course_count(), 1);
    let course = catalog.course_by_code("MAT001").unwrap();
    let expected: BTreeSet<String> =
        ["Curso A", "Curso B"].iter().map(|s| s.to_string()).collect();
    assert_eq!(course.programs, expected);
    assert_eq!(course.name, "Cálculo I");

    // each program filed the code under its own category
    let curso_a = catalog.program("Curso A").unwrap();
    assert_eq!(
        curso_a.mandatory,
        ["MAT001"].iter().map(|s| s.to_string()).collect::<BTreeSet<_>>()
    );
    assert!(curso_a.restricted_elective.is_empty());

    let curso_b = catalog.program("Curso B").unwrap();
    assert_eq!(
        curso_b.restricted_elective,
        ["MAT001"].iter().map(|s| s.to_string()).collect::<BTreeSet<_>>()
    );
    assert!(curso_b.mandatory.is_empty());

    // no info panel in the fixtures: durations fell back
    assert_eq!(curso_a.ideal_duration, "N/A");

    assert_eq!(catalog.shared_courses().len(), 1);
}
