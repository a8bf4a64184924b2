//! Line-driven session over the navigation shell and the dashboard.

use std::io::Write as _;

use medverify_core::shell::{HOW_IT_WORKS, PITCH, TAGLINE};
use medverify_core::{
    example_label, AuthForm, AuthTab, Coordinator, MedVerifyConfig, Navigator, Page,
    EXAMPLE_QUERIES,
};
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    Tab,
    SignIn(String),
    Verify(String),
    Example(usize),
    Examples,
    Go(Page),
    SignOut,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "" => Command::Empty,
        "start" => Command::Start,
        "tab" => Command::Tab,
        "signin" | "signup" | "login" => Command::SignIn(rest.to_string()),
        "verify" | "check" => Command::Verify(rest.to_string()),
        "example" => match rest.parse::<usize>() {
            Ok(n) if (1..=EXAMPLE_QUERIES.len()).contains(&n) => Command::Example(n),
            _ => Command::Unknown(line.to_string()),
        },
        "examples" => Command::Examples,
        "dashboard" | "home" => Command::Go(Page::Dashboard),
        "history" => Command::Go(Page::History),
        "submit" => Command::Go(Page::Submit),
        "profile" => Command::Go(Page::Profile),
        "signout" | "logout" => Command::SignOut,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    }
}

/// `signin <name>` takes a username; anything with an `@` is an email.
pub fn form_from_arg(arg: &str) -> AuthForm {
    if arg.contains('@') {
        AuthForm {
            email: arg.to_string(),
            ..AuthForm::default()
        }
    } else {
        AuthForm {
            username: arg.to_string(),
            ..AuthForm::default()
        }
    }
}

pub fn render_page(nav: &Navigator) -> String {
    let page = nav.page();
    let mut out = vec![page.title().to_string()];

    match page {
        Page::Landing => {
            out.push(TAGLINE.to_string());
            out.push(String::new());
            out.push(PITCH.to_string());
            out.push(String::new());
            for (i, (title, body)) in HOW_IT_WORKS.iter().enumerate() {
                out.push(format!("{}. {} — {}", i + 1, title, body));
            }
            out.push(String::new());
            out.push("Type `start` to get started.".to_string());
        }
        Page::Login => {
            let tab = |t: AuthTab, name: &str| {
                if nav.tab() == t {
                    format!("[{}]", name)
                } else {
                    format!(" {} ", name)
                }
            };
            out.push(format!(
                "{} {}   (`tab` to switch)",
                tab(AuthTab::SignUp, "Sign Up"),
                tab(AuthTab::Login, "Login")
            ));
            out.push(nav.tab().heading().to_string());
            out.push("Type `signin <username or email>` to continue.".to_string());
        }
        Page::Dashboard => {
            if let Some(session) = nav.session() {
                out.push(format!("Signed in as {}", session.display_name));
            }
            out.push("Your AI-Powered Medical Misinformation Detector".to_string());
            out.push(String::new());
            out.push("Or try an example:".to_string());
            for (i, query) in EXAMPLE_QUERIES.iter().enumerate() {
                out.push(format!("  {}. \"{}\"", i + 1, example_label(query)));
            }
            out.push(String::new());
            out.push("Type `verify <claim or URL>` or `example <N>`.".to_string());
        }
        Page::History | Page::Submit | Page::Profile => {
            out.push(page.placeholder().unwrap_or_default().to_string());
            out.push("Type `dashboard` to go back.".to_string());
        }
    }
    out.join("\n")
}

const HELP: &str = "\
Commands:
  start                      leave the landing page
  tab                        switch between Sign Up and Login
  signin <username|email>    mock sign-in (never verified)
  verify <claim or URL>      check a claim from the dashboard
  example <N> / examples     use a canned claim / list them
  dashboard | history | submit | profile
  signout                    end the session
  quit";

fn prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}

async fn verify(coordinator: &Coordinator, command: Command) {
    let progress = crate::spawn_progress(coordinator);
    let outcome = match command {
        Command::Example(n) => coordinator.submit_example(n - 1).await,
        Command::Verify(text) => coordinator.submit(&text).await,
        _ => return,
    };
    progress.abort();

    match outcome {
        Ok(_) => {
            if let Some(report) = coordinator.snapshot().report() {
                println!("\n{}\n", report.to_text());
            }
        }
        Err(e) => println!("{}", e),
    }
}

pub async fn run(config: &MedVerifyConfig) -> anyhow::Result<()> {
    let (coordinator, _) = Coordinator::from_config(config)?;
    let mut nav = Navigator::default();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}\n", render_page(&nav));
    prompt();

    while let Some(line) = lines.next_line().await? {
        let command = parse_command(&line);
        let moved = match command {
            Command::Empty => false,
            Command::Quit => break,
            Command::Help => {
                println!("{}", HELP);
                false
            }
            Command::Start => match nav.get_started() {
                Ok(_) => true,
                Err(e) => {
                    println!("{}", e);
                    false
                }
            },
            Command::Tab => {
                nav.toggle_tab();
                true
            }
            Command::SignIn(arg) => match nav.sign_in(&form_from_arg(&arg)) {
                Ok(_) => true,
                Err(e) => {
                    println!("{}", e);
                    false
                }
            },
            Command::Go(page) => match nav.go(page) {
                Ok(_) => true,
                Err(e) => {
                    println!("{}", e);
                    false
                }
            },
            Command::SignOut => {
                if let Some(session) = nav.sign_out() {
                    println!("Signed out {}.", session.display_name);
                }
                true
            }
            Command::Examples => {
                for (i, query) in EXAMPLE_QUERIES.iter().enumerate() {
                    println!("{}. {}", i + 1, query);
                }
                false
            }
            cmd @ (Command::Verify(_) | Command::Example(_)) => {
                if nav.page() == Page::Dashboard {
                    verify(&coordinator, cmd).await;
                } else {
                    println!("Open the dashboard to verify claims.");
                }
                false
            }
            Command::Unknown(text) => {
                println!("Unknown command: {} (type `help`)", text);
                false
            }
        };

        if moved {
            println!("\n{}\n", render_page(&nav));
        }
        prompt();
    }

    Ok(())
}
