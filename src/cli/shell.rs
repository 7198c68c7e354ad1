//! Interactive shell over the routed views. Every requested path runs
//! through the access gate, redirects are followed, and a 401 from the data
//! layer tears the session down and lands back on the login view.

use std::sync::Arc;

use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::debug;

use crate::api::PortalApi;
use crate::error::PortalError;
use crate::identity::{SessionManager, SessionPhase};
use crate::router::{dispatch, home_path, menu_for, Dispatch};

use super::views;

// Redirect chains are short (login -> home); anything longer is a route bug.
const REDIRECT_CAP: usize = 8;

pub struct Shell {
    session: Arc<SessionManager>,
    api: PortalApi,
    here: String,
}

impl Shell {
    pub fn new(session: Arc<SessionManager>, api: PortalApi) -> Self {
        Self { session, api, here: "/login".to_string() }
    }

    pub fn here(&self) -> &str {
        &self.here
    }

    /// Resolve, gate and render `path`, following redirects. An unauthorized
    /// error from a view clears the session and retries at the login view.
    pub async fn navigate(&mut self, path: &str) {
        let mut path = path.to_string();
        for _ in 0..REDIRECT_CAP {
            match dispatch(&path, &self.session.phase()) {
                Dispatch::Loading => {
                    println!("Carregando...");
                    return;
                }
                Dispatch::Redirect(next) => {
                    debug!(target: "shell", "redirect {} -> {}", path, next);
                    path = next.to_string();
                }
                Dispatch::Render(view, params) => {
                    match views::render(view, &params, &self.session, &self.api).await {
                        Ok(()) => {
                            self.here = path;
                            return;
                        }
                        Err(e @ PortalError::Unauthorized { .. }) => {
                            eprintln!("{}", e.toast());
                            self.session.logout();
                            path = "/login".to_string();
                        }
                        Err(e) => {
                            eprintln!("{}", e.toast());
                            return;
                        }
                    }
                }
            }
        }
        eprintln!("Redirecionamento em loop; permanecendo em {}", self.here);
    }

    /// Execute one command line. Returns false when the shell should exit.
    pub async fn handle(&mut self, line: &str) -> bool {
        let mut parts = line.split_whitespace();
        let cmd = parts.next().unwrap_or("");
        let args: Vec<&str> = parts.collect();

        // A bare path is shorthand for `open`
        if cmd.starts_with('/') {
            self.navigate(cmd).await;
            return true;
        }

        match cmd.to_ascii_lowercase().as_str() {
            "login" => {
                if args.len() != 2 {
                    println!("Use: login <email> <senha>");
                    return true;
                }
                match self.session.login(args[0], args[1]) {
                    Ok(user) => {
                        println!("Bem-vindo(a), {}!", user.first_name());
                        self.navigate(home_path(user.role)).await;
                    }
                    Err(e) => eprintln!("{}", e.toast()),
                }
            }
            "logout" => {
                self.session.logout();
                println!("Sessão encerrada.");
                self.navigate("/login").await;
            }
            "whoami" => match self.session.current_user() {
                Some(u) => println!("{} <{}> ({})", u.name, u.email, u.role.label()),
                None => println!("Não autenticado."),
            },
            "menu" => match self.session.current_user() {
                Some(u) => {
                    for entry in menu_for(u.role) {
                        let pad = 12usize.saturating_sub(entry.label.chars().count());
                        println!("  {}{}{}", entry.label, " ".repeat(pad), entry.path);
                    }
                }
                None => println!("Entre primeiro: login <email> <senha>"),
            },
            "open" | "goto" => match args.first() {
                Some(path) => self.navigate(path).await,
                None => println!("Use: {} <caminho>", cmd),
            },
            "home" => match self.session.current_user() {
                Some(u) => self.navigate(home_path(u.role)).await,
                None => self.navigate("/login").await,
            },
            "refresh" => {
                let here = self.here.clone();
                self.navigate(&here).await;
            }
            "status" => self.print_status(),
            "help" => print_help(),
            "quit" | "exit" => return false,
            other => println!("Comando desconhecido: '{}'. Digite 'help'.", other),
        }
        true
    }

    fn print_status(&self) {
        match self.session.phase() {
            SessionPhase::Pending => println!("Sessão: carregando"),
            SessionPhase::SignedOut => println!("Sessão: não autenticado"),
            SessionPhase::SignedIn(s) => {
                println!("Sessão: {} ({})", s.user.email, s.user.role.label());
                let head: String = s.token.chars().take(8).collect();
                println!("Token:  {}...", head);
            }
        }
        println!("Rota:   {}", self.here);
    }
}

/// Entry point for the binary: banner, session restore announcement, then
/// the readline loop.
pub async fn run(session: Arc<SessionManager>, api: PortalApi) -> Result<()> {
    print_banner();

    let mut shell = Shell::new(session, api);
    match shell.session.current_user() {
        Some(user) => {
            println!("Sessão restaurada: {} ({})", user.name, user.role.label());
            println!();
            shell.navigate(home_path(user.role)).await;
        }
        None => shell.navigate("/login").await,
    }
    println!();
    println!("Digite 'help' para ver os comandos.");

    let mut rl = DefaultEditor::new()?;
    loop {
        let prompt = format!("schola:{}> ", shell.here);
        match rl.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);
                if !shell.handle(line).await {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }
    println!("Até logo!");
    Ok(())
}

fn print_banner() {
    println!(
        r#"               __          __
   _____ _____/ /_  ____  / /___ _
  / ___// ___/ __ \/ __ \/ / __ `/
 (__  )/ /__/ / / / /_/ / / /_/ /
/____/ \___/_/ /_/\____/_/\__,_/"#
    );
    println!();
    println!("schola {} - portal escolar no terminal", env!("CARGO_PKG_VERSION"));
    println!();
}

fn print_help() {
    println!("Comandos:");
    println!("  login <email> <senha>   entra no portal");
    println!("  logout                  encerra a sessão");
    println!("  open <caminho>          navega para uma rota (ex.: open /grades)");
    println!("  /caminho                atalho para open");
    println!("  menu                    rotas do seu perfil");
    println!("  home                    tela inicial do seu perfil");
    println!("  refresh                 renderiza a rota atual de novo");
    println!("  whoami                  usuário autenticado");
    println!("  status                  sessão e rota atual");
    println!("  quit | exit             sai");
}
