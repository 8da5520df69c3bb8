//! Built-in curriculum: Information Systems, CEFET/RJ Nova Friburgo (2014/1).
//!
//! Subject names are kept in the institution's own wording; they are the
//! identity keys of saved and shared snapshots.

use crate::curriculum::{CourseInfo, Curriculum, CurriculumError, Period};
use crate::subject::{Prerequisite, Subject};

fn subject(name: &str, prerequisites: &[&str]) -> Subject {
    Subject {
        name: name.to_string(),
        prerequisites: prerequisites
            .iter()
            .map(|p| Prerequisite::SubjectRef(p.to_string()))
            .collect(),
    }
}

fn period(label: &str, subjects: Vec<Subject>) -> Period {
    Period::new(label, subjects)
}

/// The bundled curriculum.
pub fn builtin() -> Result<Curriculum, CurriculumError> {
    let course = CourseInfo {
        name: "Sistemas de Informação".to_string(),
        institution: Some("CEFET/RJ".to_string()),
        campus: Some("Nova Friburgo".to_string()),
        level: Some("Graduação".to_string()),
        degree: Some("Bacharelado".to_string()),
        modality: Some("Presencial".to_string()),
        established: Some("2014/1".to_string()),
        shift: Some("Noite".to_string()),
        periodicity: Some("Semestral".to_string()),
    };

    let periods = vec![
        period("1º período", vec![
            subject("Construção de Algoritmos", &[]),
            subject("Arquitetura de Computadores", &[]),
            subject("Fund. de Administração", &[]),
            subject("Gestão de Proc. de Negócios", &[]),
            subject("Fundamentos da Matemática", &[]),
            subject("Matemática Discreta", &[]),
            subject("Fundamentos de SI", &[]),
        ]),
        period("2º período", vec![
            subject("Programação Estruturada", &["Construção de Algoritmos"]),
            subject("Fundamentos de Redes", &[]),
            subject("Modelagem de Dados", &[]),
            subject("Engenharia de Requisitos", &[]),
            subject("Cálculo Dif. e Integral", &["Fundamentos da Matemática"]),
            subject("Metodologia da Pesquisa Científica", &[]),
        ]),
        period("3º período", vec![
            subject("Programação Orientada a Objetos", &["Programação Estruturada"]),
            subject("Fundamentos da Web", &[]),
            subject("Banco de Dados 1", &["Modelagem de Dados"]),
            subject("Álgebra Linear", &[]),
            subject("Algoritmos e Est. de Dados", &["Programação Estruturada", "Matemática Discreta"]),
        ]),
        period("4º período", vec![
            subject(
                "Programação de Aplicações Coorporativas",
                &["Programação Orientada a Objetos", "Fundamentos da Web"],
            ),
            subject("Sistemas Operacionais", &["Arquitetura de Computadores"]),
            subject("Banco de Dados 2", &["Banco de Dados 1"]),
            subject("Adm. de Banco de Dados", &["Banco de Dados 1"]),
            subject("Engenharia de Software", &["Engenharia de Requisitos"]),
            subject("Análise e Proj. de Sistemas", &["Engenharia de Requisitos"]),
            subject("Algoritmos em Grafos", &["Algoritmos e Est. de Dados"]),
        ]),
        period("5º período", vec![
            subject("Programação para Web", &["Fundamentos da Web"]),
            subject("Administração de Redes", &["Fundamentos de Redes"]),
            subject("Probabilidade e Estatística", &[]),
            subject("Gestão do Conhecimento da Informação", &[]),
            subject("Qualidade de Software", &["Engenharia de Software"]),
            subject("Projeto e Arq. de Software", &["Análise e Proj. de Sistemas"]),
        ]),
        period("6º período", vec![
            subject("Programação Paralela e Concorrente", &["Sistemas Operacionais"]),
            subject(
                "Seg. e Auditoria de Sistemas",
                &["Sistemas Operacionais", "Administração de Redes"],
            ),
            subject("Progr. de Clientes Web", &["Programação para Web"]),
            subject("Teste e Manut. de Software", &["Qualidade de Software"]),
            subject("Empreendedor Digital", &[]),
            subject("Optativa I", &[]),
        ]),
        period("7º período", vec![
            subject("Gestão de Projetos de TI", &[]),
            subject("Interação H/C", &[]),
            subject("Tecnologias Sustentáveis", &[]),
            subject("Ética", &[]),
            subject("Projeto Final I", &["70% do curso concluído"]),
            subject("Optativa II", &[]),
        ]),
        period("8º período", vec![
            subject("Governança de TI", &[]),
            subject("Optativa III", &[]),
            subject("Leg. e Prop. Intelectual", &[]),
            subject("Projeto Final II", &["Projeto Final I"]),
            subject("Optativa IV", &[]),
            subject("Economia", &[]),
        ]),
    ];

    Curriculum::new(course, periods)
}
