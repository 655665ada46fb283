use jupiter_scraper::builder::CatalogBuilder;
use jupiter_scraper::catalog::Catalog;
use jupiter_scraper::config::Config;
use jupiter_scraper::helpers::closest_matches;
use std::io::{self, BufRead, Write};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    log4rs::init_file("log4rs.yml", Default::default()).unwrap();

    let mut config = Config::load();
    if let Some(arg) = std::env::args().nth(1) {
        match arg.parse::<usize>() {
            Ok(count) => config.max_units = count,
            Err(_) => log::warn!("invalid unit count {:?}, scraping all units", arg),
        }
    }

    let catalog = {
        let builder = CatalogBuilder::new(config)?;
        builder.run()?
        // browser session closes here
    };

    query_shell(&catalog)?;
    Ok(())
}

fn print_help() {
    println!("Comandos:");
    println!("  unidades               lista as unidades e seus cursos");
    println!("  unidade <sigla>        mostra uma unidade pela sigla");
    println!("  curso <nome>           mostra um curso pelo nome exato");
    println!("  disciplina <código>    mostra uma disciplina por código ou nome");
    println!("  compartilhadas         disciplinas presentes em mais de um curso");
    println!("  sair                   encerra");
}

fn query_shell(catalog: &Catalog) -> io::Result<()> {
    println!(
        "Catálogo carregado: {} unidades, {} cursos, {} disciplinas.",
        catalog.units().len(),
        catalog.program_count(),
        catalog.course_count()
    );
    print_help();

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let input = line.trim();
        let (command, argument) = input.split_once(' ').unwrap_or((input, ""));
        let argument = argument.trim();

        match command {
            "" => {}
            "unidades" => {
                for unit in catalog.units() {
                    println!("{} [{} cursos]", unit.name, unit.programs.len());
                }
            }
            "unidade" => match catalog.unit_by_acronym(argument) {
                Some(unit) => println!("{}", unit),
                None => println!("Unidade {:?} não encontrada.", argument),
            },
            "curso" => show_program(catalog, argument),
            "disciplina" => show_course(catalog, argument),
            "compartilhadas" => {
                for course in catalog.shared_courses() {
                    println!(
                        "{} - {} ({} cursos)",
                        course.code,
                        course.name,
                        course.programs.len()
                    );
                }
            }
            "ajuda" | "help" => print_help(),
            "sair" | "exit" => break,
            _ => println!("Comando desconhecido: {:?}. Digite \"ajuda\".", command),
        }
    }
    Ok(())
}

fn show_program(catalog: &Catalog, name: &str) {
    match catalog.program(name) {
        Some(program) => println!("{}", program),
        None => {
            println!("Curso {:?} não encontrado.", name);
            suggest(name, catalog.program_names());
        }
    }
}

fn show_course(catalog: &Catalog, query: &str) {
    match catalog
        .course_by_code(query)
        .or_else(|| catalog.course_by_name(query))
    {
        Some(course) => println!("{}", course),
        None => {
            println!("Disciplina {:?} não encontrada.", query);
            suggest(query, catalog.course_names());
        }
    }
}

fn suggest<'a, I>(query: &str, candidates: I)
where
    I: IntoIterator<Item = &'a String>,
{
    let suggestions = closest_matches(query, candidates);
    if !suggestions.is_empty() {
        println!("Você quis dizer:");
        for suggestion in suggestions {
            println!("\t{}", suggestion);
        }
    }
}
