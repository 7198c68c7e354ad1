//! Fixed datasets behind the mock data layer. Shapes and field names follow
//! the payloads the portal backend has always returned, so JSON output mode
//! prints the familiar wire format.

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulePeriod {
    pub time: String,
    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    pub room: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDay {
    pub day: String,
    pub periods: Vec<SchedulePeriod>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,
    pub assessment: String,
    pub grade: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_grade: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectGrades {
    pub subject: String,
    pub teacher: String,
    pub grades: Vec<GradeEntry>,
    pub average: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentGrades {
    pub id: String,
    pub name: String,
    pub grades: Vec<GradeEntry>,
    pub average: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassGrades {
    pub class_name: String,
    pub subject: String,
    pub students: Vec<StudentGrades>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: String,
    pub date: NaiveDateTime,
    pub tags: Vec<String>,
    pub important: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    Pending,
    Overdue,
}

impl PaymentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "Pago",
            PaymentStatus::Pending => "Pendente",
            PaymentStatus::Overdue => "Vencido",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialRecord {
    pub id: String,
    pub description: String,
    pub amount: f64,
    pub due_date: NaiveDate,
    pub status: PaymentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub class: String,
    pub enrollment_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    Pending,
    Approved,
    Rejected,
    Completed,
}

impl RegistrationStatus {
    pub fn label(&self) -> &'static str {
        match self {
            RegistrationStatus::Pending => "Pendente",
            RegistrationStatus::Approved => "Aprovada",
            RegistrationStatus::Rejected => "Rejeitada",
            RegistrationStatus::Completed => "Concluída",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub id: String,
    pub student_name: String,
    pub student_id: String,
    pub class: String,
    pub academic_year: String,
    pub status: RegistrationStatus,
    pub submission_date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Enrollment,
    Transcript,
    Certificate,
    Transfer,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Pending,
    Processing,
    Completed,
    Rejected,
}

impl DocumentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            DocumentStatus::Pending => "Pendente",
            DocumentStatus::Processing => "Em Processamento",
            DocumentStatus::Completed => "Concluído",
            DocumentStatus::Rejected => "Rejeitado",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Normal,
    Urgent,
}

impl Urgency {
    pub fn label(&self) -> &'static str {
        match self {
            Urgency::Normal => "Normal",
            Urgency::Urgent => "Urgente",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRequest {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: DocumentKind,
    pub type_name: String,
    pub student_name: String,
    pub student_id: String,
    pub request_date: NaiveDate,
    pub status: DocumentStatus,
    pub urgency: Urgency,
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn dt(y: i32, m: u32, day: u32, h: u32, min: u32) -> NaiveDateTime {
    d(y, m, day).and_hms_opt(h, min, 0).unwrap()
}

fn p(time: &str, subject: &str, teacher: &str, room: &str) -> SchedulePeriod {
    SchedulePeriod {
        time: time.into(),
        subject: subject.into(),
        teacher: Some(teacher.into()),
        class: None,
        room: room.into(),
    }
}

fn cp(time: &str, subject: &str, class: &str, room: &str) -> SchedulePeriod {
    SchedulePeriod {
        time: time.into(),
        subject: subject.into(),
        teacher: None,
        class: Some(class.into()),
        room: room.into(),
    }
}

fn day(name: &str, periods: Vec<SchedulePeriod>) -> ScheduleDay {
    ScheduleDay { day: name.into(), periods }
}

// Term assessment out of 10.
fn g(term: &str, assessment: &str, grade: f64) -> GradeEntry {
    GradeEntry {
        term: Some(term.into()),
        assessment: assessment.into(),
        grade,
        max_grade: Some(10.0),
    }
}

// Class-view assessment: no term breakdown.
fn cg(assessment: &str, grade: f64) -> GradeEntry {
    GradeEntry { term: None, assessment: assessment.into(), grade, max_grade: None }
}

static STUDENT_SCHEDULE: Lazy<Vec<ScheduleDay>> = Lazy::new(|| {
    vec![
        day("Segunda-feira", vec![
            p("7:30 - 8:20", "Matemática", "Maria Oliveira", "101"),
            p("8:20 - 9:10", "Português", "Ana Santos", "102"),
            p("9:10 - 10:00", "História", "Pedro Costa", "103"),
            p("10:20 - 11:10", "Geografia", "Carla Lima", "104"),
            p("11:10 - 12:00", "Ciências", "Bruno Dias", "105"),
        ]),
        day("Terça-feira", vec![
            p("7:30 - 8:20", "Português", "Ana Santos", "102"),
            p("8:20 - 9:10", "Física", "Maria Oliveira", "106"),
            p("9:10 - 10:00", "Educação Física", "Rafael Sousa", "Quadra"),
            p("10:20 - 11:10", "Inglês", "Júlia Mendes", "107"),
            p("11:10 - 12:00", "Artes", "Fernanda Gomes", "108"),
        ]),
        day("Quarta-feira", vec![
            p("7:30 - 8:20", "Matemática", "Maria Oliveira", "101"),
            p("8:20 - 9:10", "Química", "Roberto Alves", "109"),
            p("9:10 - 10:00", "Biologia", "Camila Rocha", "110"),
            p("10:20 - 11:10", "História", "Pedro Costa", "103"),
            p("11:10 - 12:00", "Geografia", "Carla Lima", "104"),
        ]),
        day("Quinta-feira", vec![
            p("7:30 - 8:20", "Física", "Maria Oliveira", "106"),
            p("8:20 - 9:10", "Matemática", "Maria Oliveira", "101"),
            p("9:10 - 10:00", "Português", "Ana Santos", "102"),
            p("10:20 - 11:10", "Educação Física", "Rafael Sousa", "Quadra"),
            p("11:10 - 12:00", "Inglês", "Júlia Mendes", "107"),
        ]),
        day("Sexta-feira", vec![
            p("7:30 - 8:20", "Química", "Roberto Alves", "109"),
            p("8:20 - 9:10", "Biologia", "Camila Rocha", "110"),
            p("9:10 - 10:00", "Filosofia", "Marcos Vieira", "111"),
            p("10:20 - 11:10", "Sociologia", "Patrícia Ramos", "112"),
            p("11:10 - 12:00", "Literatura", "Ana Santos", "102"),
        ]),
    ]
});

static TEACHER_SCHEDULE: Lazy<Vec<ScheduleDay>> = Lazy::new(|| {
    vec![
        day("Segunda-feira", vec![
            cp("7:30 - 8:20", "Matemática", "9º Ano A", "101"),
            cp("8:20 - 9:10", "Matemática", "9º Ano B", "101"),
            cp("9:10 - 10:00", "Física", "3º Ano A", "106"),
            cp("10:20 - 11:10", "Física", "3º Ano B", "106"),
            cp("11:10 - 12:00", "Matemática", "8º Ano A", "101"),
        ]),
        day("Terça-feira", vec![
            cp("7:30 - 9:10", "Coordenação", "-", "Sala dos Professores"),
            cp("9:10 - 10:00", "Física", "2º Ano A", "106"),
            cp("10:20 - 11:10", "Física", "2º Ano B", "106"),
            cp("11:10 - 12:00", "Matemática", "7º Ano A", "101"),
        ]),
        day("Quarta-feira", vec![
            cp("7:30 - 8:20", "Matemática", "8º Ano B", "101"),
            cp("8:20 - 9:10", "Matemática", "7º Ano B", "101"),
            cp("9:10 - 10:00", "Física", "1º Ano A", "106"),
            cp("10:20 - 12:00", "Reunião de Departamento", "-", "Sala de Reuniões"),
        ]),
        day("Quinta-feira", vec![
            cp("7:30 - 8:20", "Física", "1º Ano B", "106"),
            cp("8:20 - 9:10", "Matemática", "6º Ano A", "101"),
            cp("9:10 - 10:00", "Matemática", "6º Ano B", "101"),
            cp("10:20 - 12:00", "Planejamento", "-", "Sala dos Professores"),
        ]),
        day("Sexta-feira", vec![
            cp("7:30 - 9:10", "Orientação de Projetos", "Clube de Ciências", "Laboratório"),
            cp("9:10 - 10:00", "Física", "3º Ano A", "106"),
            cp("10:20 - 11:10", "Física", "2º Ano A", "106"),
            cp("11:10 - 12:00", "Matemática", "9º Ano A", "101"),
        ]),
    ]
});

static STUDENT_GRADES: Lazy<Vec<SubjectGrades>> = Lazy::new(|| {
    vec![
        SubjectGrades {
            subject: "Matemática".into(),
            teacher: "Maria Oliveira".into(),
            grades: vec![
                g("1º Bimestre", "Prova 1", 8.5),
                g("1º Bimestre", "Trabalho", 9.0),
                g("1º Bimestre", "Participação", 8.0),
                g("2º Bimestre", "Prova 1", 7.5),
                g("2º Bimestre", "Trabalho", 9.5),
            ],
            average: 8.5,
        },
        SubjectGrades {
            subject: "Português".into(),
            teacher: "Ana Santos".into(),
            grades: vec![
                g("1º Bimestre", "Prova 1", 7.0),
                g("1º Bimestre", "Redação", 8.5),
                g("1º Bimestre", "Seminário", 9.0),
                g("2º Bimestre", "Prova 1", 8.0),
                g("2º Bimestre", "Redação", 8.0),
            ],
            average: 8.1,
        },
        SubjectGrades {
            subject: "História".into(),
            teacher: "Pedro Costa".into(),
            grades: vec![
                g("1º Bimestre", "Prova 1", 9.0),
                g("1º Bimestre", "Trabalho", 8.5),
                g("1º Bimestre", "Debate", 9.5),
                g("2º Bimestre", "Prova 1", 8.5),
                g("2º Bimestre", "Trabalho", 9.0),
            ],
            average: 8.9,
        },
        SubjectGrades {
            subject: "Geografia".into(),
            teacher: "Carla Lima".into(),
            grades: vec![
                g("1º Bimestre", "Prova 1", 7.5),
                g("1º Bimestre", "Trabalho", 8.0),
                g("1º Bimestre", "Atividade", 8.5),
                g("2º Bimestre", "Prova 1", 8.0),
            ],
            average: 8.0,
        },
        SubjectGrades {
            subject: "Ciências".into(),
            teacher: "Bruno Dias".into(),
            grades: vec![
                g("1º Bimestre", "Prova 1", 9.0),
                g("1º Bimestre", "Experimento", 10.0),
                g("1º Bimestre", "Relatório", 8.5),
                g("2º Bimestre", "Prova 1", 8.0),
                g("2º Bimestre", "Experimento", 9.5),
            ],
            average: 9.0,
        },
    ]
});

static CLASS_STUDENTS: Lazy<Vec<StudentGrades>> = Lazy::new(|| {
    vec![
        StudentGrades {
            id: "001".into(),
            name: "Ana Beatriz".into(),
            grades: vec![cg("Prova 1", 8.5), cg("Trabalho", 9.0), cg("Participação", 8.0)],
            average: 8.5,
        },
        StudentGrades {
            id: "002".into(),
            name: "Bruno Cardoso".into(),
            grades: vec![cg("Prova 1", 7.0), cg("Trabalho", 8.0), cg("Participação", 9.0)],
            average: 8.0,
        },
        StudentGrades {
            id: "003".into(),
            name: "Carolina Duarte".into(),
            grades: vec![cg("Prova 1", 9.5), cg("Trabalho", 9.0), cg("Participação", 8.5)],
            average: 9.0,
        },
        StudentGrades {
            id: "004".into(),
            name: "Daniel Esteves".into(),
            grades: vec![cg("Prova 1", 6.5), cg("Trabalho", 7.0), cg("Participação", 8.0)],
            average: 7.2,
        },
        StudentGrades {
            id: "005".into(),
            name: "Eduarda Freitas".into(),
            grades: vec![cg("Prova 1", 8.0), cg("Trabalho", 8.5), cg("Participação", 9.0)],
            average: 8.5,
        },
    ]
});

static ANNOUNCEMENTS: Lazy<Vec<Announcement>> = Lazy::new(|| {
    let ann = |id: &str, title: &str, content: &str, author: &str, date: NaiveDateTime, tags: &[&str], important: bool| Announcement {
        id: id.into(),
        title: title.into(),
        content: content.into(),
        author: author.into(),
        date,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        important,
    };
    vec![
        ann(
            "1",
            "Suspensão de Aulas - Recesso",
            "Informamos que não haverá aula nos dias 20 e 21 de outubro devido ao recesso escolar. As atividades retornarão normalmente no dia 22/10.",
            "Coordenação Pedagógica",
            dt(2023, 10, 15, 10, 30),
            &["recesso", "calendário"],
            true,
        ),
        ann(
            "2",
            "Feira de Ciências - Inscrições Abertas",
            "Estão abertas as inscrições para a Feira de Ciências que ocorrerá no dia 15/11. Os alunos interessados devem procurar seus professores de Ciências, Física, Química ou Biologia para orientações sobre os projetos.",
            "Departamento de Ciências",
            dt(2023, 10, 10, 14, 15),
            &["feira", "ciências", "inscrições"],
            true,
        ),
        ann(
            "3",
            "Palestra sobre Profissões",
            "No próximo dia 25/10, teremos uma palestra sobre carreiras e profissões voltada para os alunos do Ensino Médio. Confirme sua presença com o orientador educacional.",
            "Serviço de Orientação Educacional",
            dt(2023, 10, 8, 9, 45),
            &["palestra", "carreiras", "orientação"],
            false,
        ),
        ann(
            "4",
            "Reunião de Pais e Mestres",
            "A próxima reunião de pais e mestres será realizada no dia 28/10, sábado, das 9h às 12h. É importante a presença de todos os responsáveis para acompanhamento do desempenho escolar.",
            "Direção Escolar",
            dt(2023, 10, 5, 16, 20),
            &["reunião", "pais", "responsáveis"],
            true,
        ),
        ann(
            "5",
            "Campeonato Interclasses",
            "O Campeonato Interclasses de Futsal começará no dia 30/10. Os times devem ser inscritos com o professor de Educação Física até o dia 20/10.",
            "Departamento de Educação Física",
            dt(2023, 10, 3, 11, 10),
            &["esporte", "campeonato", "futsal"],
            false,
        ),
        ann(
            "6",
            "Novo Sistema de Entrada e Saída",
            "A partir do dia 01/11, o acesso à escola será feito apenas mediante apresentação da carteirinha estudantil. Os alunos que ainda não possuem devem procurar a secretaria.",
            "Administração Escolar",
            dt(2023, 9, 28, 8, 30),
            &["segurança", "acesso", "carteirinha"],
            true,
        ),
    ]
});

static FINANCE_RECORDS: Lazy<Vec<FinancialRecord>> = Lazy::new(|| {
    let fin = |id: &str, description: &str, amount: f64, due: NaiveDate, status: PaymentStatus, paid: Option<NaiveDate>| FinancialRecord {
        id: id.into(),
        description: description.into(),
        amount,
        due_date: due,
        status,
        payment_date: paid,
    };
    vec![
        fin("1", "Mensalidade Escolar - Outubro/2023", 800.0, d(2023, 10, 10), PaymentStatus::Paid, Some(d(2023, 10, 8))),
        fin("2", "Mensalidade Escolar - Novembro/2023", 800.0, d(2023, 11, 10), PaymentStatus::Pending, None),
        fin("3", "Material Didático - 4º Bimestre", 350.0, d(2023, 10, 15), PaymentStatus::Paid, Some(d(2023, 10, 14))),
        fin("4", "Excursão Pedagógica - Museu", 120.0, d(2023, 9, 20), PaymentStatus::Paid, Some(d(2023, 9, 18))),
        fin("5", "Atividades Extracurriculares - Esportes", 200.0, d(2023, 9, 5), PaymentStatus::Paid, Some(d(2023, 9, 5))),
        fin("6", "Atividades Extracurriculares - Música", 180.0, d(2023, 10, 25), PaymentStatus::Overdue, None),
    ]
});

static STUDENTS: Lazy<Vec<StudentRecord>> = Lazy::new(|| {
    let stu = |id: &str, name: &str, email: &str, class: &str, enrollment: &str| StudentRecord {
        id: id.into(),
        name: name.into(),
        email: email.into(),
        class: class.into(),
        enrollment_id: enrollment.into(),
    };
    vec![
        stu("1", "João Silva", "joao.silva@exemplo.com", "9º Ano A", "20230001"),
        stu("2", "Maria Santos", "maria.santos@exemplo.com", "9º Ano A", "20230002"),
        stu("3", "Pedro Oliveira", "pedro.oliveira@exemplo.com", "8º Ano B", "20230003"),
        stu("4", "Ana Souza", "ana.souza@exemplo.com", "7º Ano C", "20230004"),
        stu("5", "Lucas Ferreira", "lucas.ferreira@exemplo.com", "8º Ano B", "20230005"),
    ]
});

static REGISTRATIONS: Lazy<Vec<Registration>> = Lazy::new(|| {
    let reg = |id: &str, name: &str, sid: &str, class: &str, status: RegistrationStatus, date: NaiveDate| Registration {
        id: id.into(),
        student_name: name.into(),
        student_id: sid.into(),
        class: class.into(),
        academic_year: "2023/2024".into(),
        status,
        submission_date: date,
    };
    vec![
        reg("REG20230001", "Carlos Mendes", "ST00123", "9º Ano A", RegistrationStatus::Completed, d(2023, 1, 15)),
        reg("REG20230002", "Ana Beatriz", "ST00124", "8º Ano B", RegistrationStatus::Approved, d(2023, 1, 18)),
        reg("REG20230003", "Roberto Silva", "ST00125", "7º Ano C", RegistrationStatus::Pending, d(2023, 1, 20)),
        reg("REG20230004", "Juliana Pereira", "ST00126", "6º Ano A", RegistrationStatus::Rejected, d(2023, 1, 22)),
        reg("REG20230005", "Lucas Martins", "ST00127", "9º Ano B", RegistrationStatus::Pending, d(2023, 1, 25)),
    ]
});

static DOCUMENTS: Lazy<Vec<DocumentRequest>> = Lazy::new(|| {
    let doc = |id: &str, kind: DocumentKind, type_name: &str, name: &str, sid: &str, date: NaiveDate, status: DocumentStatus, urgency: Urgency| DocumentRequest {
        id: id.into(),
        kind,
        type_name: type_name.into(),
        student_name: name.into(),
        student_id: sid.into(),
        request_date: date,
        status,
        urgency,
    };
    vec![
        doc("DOC20230001", DocumentKind::Enrollment, "Declaração de Matrícula", "Maria Silva", "ST00128", d(2023, 9, 15), DocumentStatus::Completed, Urgency::Normal),
        doc("DOC20230002", DocumentKind::Transcript, "Histórico Escolar", "João Santos", "ST00129", d(2023, 9, 18), DocumentStatus::Processing, Urgency::Urgent),
        doc("DOC20230003", DocumentKind::Certificate, "Certificado de Conclusão", "Ana Oliveira", "ST00130", d(2023, 9, 20), DocumentStatus::Pending, Urgency::Normal),
        doc("DOC20230004", DocumentKind::Transfer, "Transferência Escolar", "Carlos Lima", "ST00131", d(2023, 9, 22), DocumentStatus::Rejected, Urgency::Urgent),
        doc("DOC20230005", DocumentKind::Other, "Atestado de Frequência", "Patrícia Costa", "ST00132", d(2023, 9, 25), DocumentStatus::Pending, Urgency::Normal),
    ]
});

pub fn student_schedule() -> Vec<ScheduleDay> {
    STUDENT_SCHEDULE.clone()
}

pub fn teacher_schedule() -> Vec<ScheduleDay> {
    TEACHER_SCHEDULE.clone()
}

pub fn student_grades() -> Vec<SubjectGrades> {
    STUDENT_GRADES.clone()
}

/// Grade sheet for one of the teacher's classes. The mock sheet is the same
/// for every class name, as it always has been.
pub fn class_grades(class_name: &str) -> ClassGrades {
    ClassGrades {
        class_name: class_name.to_string(),
        subject: "Matemática".into(),
        students: CLASS_STUDENTS.clone(),
    }
}

pub fn announcements() -> Vec<Announcement> {
    ANNOUNCEMENTS.clone()
}

pub fn finance_records() -> Vec<FinancialRecord> {
    FINANCE_RECORDS.clone()
}

pub fn students() -> Vec<StudentRecord> {
    STUDENTS.clone()
}

pub fn registrations() -> Vec<Registration> {
    REGISTRATIONS.clone()
}

pub fn documents() -> Vec<DocumentRequest> {
    DOCUMENTS.clone()
}
