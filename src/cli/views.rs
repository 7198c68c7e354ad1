//! Renders each routed view to the terminal. The shell resolves a path to a
//! [`View`] and hands it here together with the captured params; everything
//! the views show comes through [`PortalApi`], so an expired session surfaces
//! as an unauthorized error rather than stale output.

use chrono::{Datelike, Local, Timelike};
use serde::Serialize;

use crate::api::{
    document_counts, finance_summary, greeting_for_hour, important_recent, overall_average,
    performance_bands, periods_for, registration_counts, school_day_for, weekday_name, PortalApi,
    ScheduleDay, SubjectGrades,
};
use crate::error::{PortalError, PortalResult};
use crate::identity::{Role, SessionManager, User};
use crate::router::{Params, View};

use super::{json_output, print_kv, print_table};

// The registration pages of the portal are pinned to the current cycle.
const ACADEMIC_YEAR: &str = "2023/2024";

/// Render `view` for the current session. Callers route through the access
/// gate first; the user lookup here only guards direct calls.
pub async fn render(
    view: View,
    params: &Params,
    session: &SessionManager,
    api: &PortalApi,
) -> PortalResult<()> {
    match view {
        View::Login => render_login(),
        View::Dashboard => render_dashboard(session, api).await?,
        View::Schedule => render_schedule(session, api).await?,
        View::Grades => render_grades(session, api).await?,
        View::Announcements => render_announcements(api).await?,
        View::Profile => render_profile(session)?,
        View::GuardianChildren => render_children(session)?,
        View::GuardianChildDetail => render_child_detail(params, api).await?,
        View::GuardianFinance => render_finance(api).await?,
        View::SecretaryStudents => render_students(api).await?,
        View::SecretaryRegistrations => render_registrations(api).await?,
        View::SecretaryDocuments => render_documents(api).await?,
        View::NotFound => println!("404 - Página não encontrada."),
    }
    Ok(())
}

fn require_user(session: &SessionManager) -> PortalResult<User> {
    session
        .current_user()
        .ok_or_else(|| PortalError::unauthorized("view rendered without a session"))
}

fn emit_json<T: Serialize>(payload: &T) -> PortalResult<()> {
    let text = serde_json::to_string_pretty(payload)
        .map_err(|e| PortalError::storage(format!("json encode: {e}")))?;
    println!("{}", text);
    Ok(())
}

fn brl(v: f64) -> String {
    format!("R$ {:.2}", v).replace('.', ",")
}

async fn schedule_for(session: &SessionManager, api: &PortalApi) -> PortalResult<Vec<ScheduleDay>> {
    let user = require_user(session)?;
    if user.role == Role::Student {
        api.student_schedule().await
    } else {
        api.teacher_schedule().await
    }
}

fn render_login() {
    println!("== Portal Escolar - Login ==");
    println!();
    println!("Use: login <email> <senha>");
    println!();
    println!("Contas de demonstração (senha: senha123):");
    let accounts = [
        ("Aluno", "aluno@escola.com"),
        ("Professor", "professor@escola.com"),
        ("Diretor", "diretor@escola.com"),
        ("Responsável", "responsavel@escola.com"),
        ("Secretaria", "secretaria@escola.com"),
    ];
    for (label, email) in accounts {
        let pad = 12usize.saturating_sub(label.chars().count());
        println!("  {}{}{}", label, " ".repeat(pad), email);
    }
}

async fn render_dashboard(session: &SessionManager, api: &PortalApi) -> PortalResult<()> {
    let user = require_user(session)?;
    let now = Local::now();

    println!("{}, {}!", greeting_for_hour(now.hour()), user.first_name());
    println!("{}, {}", weekday_name(now.weekday()), now.format("%d/%m/%Y"));
    println!();

    let week = schedule_for(session, api).await?;
    let today = periods_for(&week, weekday_name(now.weekday()));
    if today.is_empty() {
        println!("Nenhuma aula hoje.");
    } else {
        println!("Aulas de hoje:");
        let rows: Vec<Vec<String>> = today
            .iter()
            .map(|p| {
                let with = p
                    .teacher
                    .clone()
                    .or_else(|| p.class.clone())
                    .unwrap_or_else(|| "-".to_string());
                vec![p.time.clone(), p.subject.clone(), with, p.room.clone()]
            })
            .collect();
        print_table(&["Horário", "Aula", "Com", "Sala"], &rows);
    }

    if user.role == Role::Student {
        let grades = api.student_grades().await?;
        println!();
        println!("Média geral: {:.1}", overall_average(&grades));
    }

    let top = important_recent(&api.announcements().await?);
    if !top.is_empty() {
        println!();
        println!("Avisos importantes:");
        for a in &top {
            println!("  [{}] {}", a.date.format("%d/%m"), a.title);
        }
    }
    Ok(())
}

async fn render_schedule(session: &SessionManager, api: &PortalApi) -> PortalResult<()> {
    let user = require_user(session)?;
    let week = schedule_for(session, api).await?;
    if json_output() {
        return emit_json(&week);
    }

    let focus = school_day_for(Local::now().weekday());
    let with_col = if user.role == Role::Student { "Professor" } else { "Turma" };
    println!("== Horário ==");
    for day in &week {
        let marker = if day.day == focus { " (hoje)" } else { "" };
        println!();
        println!("{}{}", day.day, marker);
        let rows: Vec<Vec<String>> = day
            .periods
            .iter()
            .map(|p| {
                let with = p
                    .teacher
                    .clone()
                    .or_else(|| p.class.clone())
                    .unwrap_or_else(|| "-".to_string());
                vec![p.time.clone(), p.subject.clone(), with, p.room.clone()]
            })
            .collect();
        print_table(&["Horário", "Disciplina", with_col, "Sala"], &rows);
    }
    Ok(())
}

async fn render_grades(session: &SessionManager, api: &PortalApi) -> PortalResult<()> {
    let user = require_user(session)?;
    if user.role == Role::Student {
        let grades = api.student_grades().await?;
        if json_output() {
            return emit_json(&grades);
        }
        render_report_card(&grades);
    } else {
        // Teachers (and the director) see the class sheet instead.
        let class_name = user.class.clone().unwrap_or_else(|| "9º Ano A".to_string());
        let sheet = api.class_grades(&class_name).await?;
        if json_output() {
            return emit_json(&sheet);
        }
        println!("== Notas - {} ({}) ==", sheet.class_name, sheet.subject);
        let rows: Vec<Vec<String>> = sheet
            .students
            .iter()
            .map(|s| {
                let assessments = s
                    .grades
                    .iter()
                    .map(|g| format!("{} {:.1}", g.assessment, g.grade))
                    .collect::<Vec<_>>()
                    .join(", ");
                vec![s.id.clone(), s.name.clone(), assessments, format!("{:.1}", s.average)]
            })
            .collect();
        print_table(&["Nº", "Aluno", "Avaliações", "Média"], &rows);
    }
    Ok(())
}

fn render_report_card(grades: &[SubjectGrades]) {
    println!("== Boletim ==");
    let mut rows = Vec::new();
    for subject in grades {
        for g in &subject.grades {
            rows.push(vec![
                subject.subject.clone(),
                g.term.clone().unwrap_or_default(),
                g.assessment.clone(),
                format!("{:.1}", g.grade),
            ]);
        }
    }
    print_table(&["Disciplina", "Bimestre", "Avaliação", "Nota"], &rows);

    println!();
    let rows: Vec<Vec<String>> = grades
        .iter()
        .map(|s| vec![s.subject.clone(), s.teacher.clone(), format!("{:.1}", s.average)])
        .collect();
    print_table(&["Disciplina", "Professor", "Média"], &rows);
    println!("Média geral: {:.1}", overall_average(grades));
}

async fn render_announcements(api: &PortalApi) -> PortalResult<()> {
    let items = api.announcements().await?;
    if json_output() {
        return emit_json(&items);
    }
    println!("== Avisos ==");
    for a in &items {
        let star = if a.important { "* " } else { "" };
        println!();
        println!("{}{}", star, a.title);
        println!("  {} | {} | {}", a.date.format("%d/%m/%Y %H:%M"), a.author, a.tags.join(", "));
        println!("  {}", a.content);
    }
    Ok(())
}

fn render_profile(session: &SessionManager) -> PortalResult<()> {
    let user = require_user(session)?;
    println!("== Perfil ==");
    let mut pairs: Vec<(&str, String)> = vec![
        ("Nome", user.name.clone()),
        ("Email", user.email.clone()),
        ("Perfil", user.role.label().to_string()),
    ];
    if let Some(v) = &user.enrollment_id {
        pairs.push(("Matrícula", v.clone()));
    }
    for id in [&user.teacher_id, &user.admin_id, &user.guardian_id, &user.secretary_id] {
        if let Some(v) = id {
            pairs.push(("Registro", v.clone()));
        }
    }
    if let Some(v) = &user.class {
        pairs.push(("Turma", v.clone()));
    }
    if let Some(v) = &user.subjects {
        pairs.push(("Disciplinas", v.join(", ")));
    }
    let kids = user.linked_children();
    if !kids.is_empty() {
        let names = kids.iter().map(|c| c.name.as_str()).collect::<Vec<_>>().join(", ");
        pairs.push(("Filhos", names));
    }
    print_kv(&pairs);
    Ok(())
}

fn render_children(session: &SessionManager) -> PortalResult<()> {
    let user = require_user(session)?;
    let kids = user.linked_children();
    if json_output() {
        return emit_json(&kids);
    }
    println!("== Meus Filhos ==");
    if kids.is_empty() {
        println!("Nenhum estudante vinculado.");
        return Ok(());
    }
    let rows: Vec<Vec<String>> = kids
        .iter()
        .map(|c| vec![c.id.clone(), c.name.clone(), c.class.clone(), c.enrollment_id.clone()])
        .collect();
    print_table(&["Id", "Nome", "Turma", "Matrícula"], &rows);
    println!("Use: open /guardian/children/<id>");
    Ok(())
}

async fn render_child_detail(params: &Params, api: &PortalApi) -> PortalResult<()> {
    let child_id = params.get("id").map(String::as_str).unwrap_or("");
    let child = match api.child(child_id).await {
        Ok(c) => c,
        Err(PortalError::NotFound { .. }) => {
            println!("Estudante não encontrado.");
            return Ok(());
        }
        Err(e) => return Err(e),
    };
    let grades = api.student_grades().await?;
    if json_output() {
        return emit_json(&serde_json::json!({ "child": child, "grades": grades }));
    }

    println!("== {} ==", child.name);
    print_kv(&[("Turma", child.class.clone()), ("Matrícula", child.enrollment_id.clone())]);
    println!();
    let bands = performance_bands(&grades);
    println!("Média geral: {:.1}", overall_average(&grades));
    println!(
        "Disciplinas: {} acima de 8,0 | {} entre 6,0 e 8,0 | {} abaixo de 6,0",
        bands.good, bands.average, bands.risk
    );
    println!();
    let rows: Vec<Vec<String>> = grades
        .iter()
        .map(|s| vec![s.subject.clone(), s.teacher.clone(), format!("{:.1}", s.average)])
        .collect();
    print_table(&["Disciplina", "Professor", "Média"], &rows);
    Ok(())
}

async fn render_finance(api: &PortalApi) -> PortalResult<()> {
    let records = api.finance_records().await?;
    if json_output() {
        return emit_json(&records);
    }
    println!("== Financeiro ==");
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|r| {
            let paid_on = r
                .payment_date
                .map(|d| d.format("%d/%m/%Y").to_string())
                .unwrap_or_else(|| "-".to_string());
            vec![
                r.description.clone(),
                r.due_date.format("%d/%m/%Y").to_string(),
                brl(r.amount),
                r.status.label().to_string(),
                paid_on,
            ]
        })
        .collect();
    print_table(&["Descrição", "Vencimento", "Valor", "Situação", "Pagamento"], &rows);

    let s = finance_summary(&records);
    println!(
        "Pago: {} | Pendente: {} | Vencido: {} | Total: {}",
        brl(s.paid),
        brl(s.pending),
        brl(s.overdue),
        brl(s.total)
    );
    Ok(())
}

async fn render_students(api: &PortalApi) -> PortalResult<()> {
    let roster = api.students().await?;
    if json_output() {
        return emit_json(&roster);
    }
    println!("== Alunos ==");
    let rows: Vec<Vec<String>> = roster
        .iter()
        .map(|s| vec![s.name.clone(), s.email.clone(), s.class.clone(), s.enrollment_id.clone()])
        .collect();
    print_table(&["Nome", "Email", "Turma", "Matrícula"], &rows);
    println!("{} alunos cadastrados", roster.len());
    Ok(())
}

async fn render_registrations(api: &PortalApi) -> PortalResult<()> {
    let records = api.registrations().await?;
    if json_output() {
        return emit_json(&records);
    }
    println!("== Matrículas {} ==", ACADEMIC_YEAR);
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|r| {
            vec![
                r.id.clone(),
                r.student_name.clone(),
                r.class.clone(),
                r.status.label().to_string(),
                r.submission_date.format("%d/%m/%Y").to_string(),
            ]
        })
        .collect();
    print_table(&["Protocolo", "Aluno", "Turma", "Situação", "Envio"], &rows);

    let c = registration_counts(&records, ACADEMIC_YEAR);
    println!(
        "{} no total: {} pendentes, {} aprovadas, {} rejeitadas, {} concluídas",
        c.all, c.pending, c.approved, c.rejected, c.completed
    );
    Ok(())
}

async fn render_documents(api: &PortalApi) -> PortalResult<()> {
    let records = api.documents().await?;
    if json_output() {
        return emit_json(&records);
    }
    println!("== Documentos ==");
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|r| {
            vec![
                r.id.clone(),
                r.student_name.clone(),
                r.type_name.clone(),
                r.status.label().to_string(),
                r.urgency.label().to_string(),
                r.request_date.format("%d/%m/%Y").to_string(),
            ]
        })
        .collect();
    print_table(&["Protocolo", "Aluno", "Documento", "Situação", "Urgência", "Solicitado"], &rows);

    let c = document_counts(&records);
    println!(
        "{} no total: {} pendentes, {} em processamento, {} concluídos, {} rejeitados",
        c.all, c.pending, c.processing, c.completed, c.rejected
    );
    Ok(())
}
