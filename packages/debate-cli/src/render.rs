use colored::{ColoredString, Colorize};
use debate_client::{
    AgentRole, AgentStatus, AgentStatuses, Argument, DebateState, Decision, Verdict, Winner,
};
use tokio::sync::watch;

pub fn decision_banner(decision: &str) {
    println!("{}", "╔══ Decision under debate ══".bright_cyan());
    println!("{} {}", "║".bright_cyan(), decision.bold());
    println!("{}", "╚═══════════════════════════".bright_cyan());
    println!();
}

/// Print a line each time an agent starts or finishes, until the session goes away.
pub async fn follow_progress(mut updates: watch::Receiver<DebateState>) {
    let mut seen = AgentStatuses::default();

    while updates.changed().await.is_ok() {
        let current = updates.borrow_and_update().agent_status.clone();
        for role in AgentRole::ALL {
            let status = current.get(role);
            if status > seen.get(role) {
                println!("  {} {}", role_label(role), status_label(status));
            }
        }
        seen = current;
    }
}

pub fn failure(message: &str) {
    println!();
    println!("{} {}", "✖ Debate failed:".red().bold(), message);
}

pub fn debate(state: &DebateState) {
    arguments("PRO Arguments", "PRO", &state.pro_arguments, |s| s.green());
    arguments("CON Arguments", "CON", &state.con_arguments, |s| s.red());

    match &state.verdict {
        Some(v) => verdict(v),
        None => println!("\n{}", "The judge returned no verdict.".yellow()),
    }
}

fn arguments(
    title: &str,
    label: &str,
    args: &[Argument],
    paint: impl Fn(&str) -> ColoredString,
) {
    println!("\n{}", paint(title).bold());
    if args.is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for (i, arg) in args.iter().enumerate() {
        println!("  {} {}", paint(&format!("{} #{}", label, i + 1)), arg.claim.bold());
        println!("    {} {}", "Reasoning:".dimmed(), arg.reasoning);
        println!("    {} {}", "Evidence:".dimmed(), arg.evidence);
        println!("    {} {}", "Risk:".dimmed(), arg.risk);
        println!("    {} {}", "Confidence:".dimmed(), percent(arg.confidence));
    }
}

fn verdict(v: &Verdict) {
    println!("\n{}", "Scorecard".bright_cyan().bold());
    println!(
        "  {:<28} {:>6} {:>5} {:>5}  {}",
        "Criterion", "Weight", "PRO", "CON", "Rationale"
    );
    for row in &v.scorecard {
        println!(
            "  {:<28} {:>6.2} {:>5.1} {:>5.1}  {}",
            row.criterion, row.weight, row.pro_score, row.con_score, row.rationale
        );
    }

    println!("\n{}", "Verdict".bright_cyan().bold());
    println!("  {} {}", "Decision:".dimmed(), decision_label(v.decision));
    println!("  {} {}", "Winner:".dimmed(), winner_label(v.winner));
    println!("  {} {}", "Confidence:".dimmed(), percent(v.confidence));
    println!("  {}", v.summary);

    list("Key risks", &v.key_risks);
    list("Assumptions to verify", &v.assumptions_to_verify);
    list("Next 48h actions", &v.next_48h_actions);
    if v.needs_more_info {
        list("Clarifying questions", &v.clarifying_questions);
    }
}

fn list(title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("\n{}", title.bold());
    for item in items {
        println!("  • {}", item);
    }
}

fn percent(confidence: f64) -> String {
    // Values above 1 come from a 0..=10 scale and are printed as-is
    if confidence <= 1.0 {
        format!("{:.0}%", confidence * 100.0)
    } else {
        format!("{:.1}", confidence)
    }
}

fn role_label(role: AgentRole) -> ColoredString {
    match role {
        AgentRole::Pro => "PRO  ".green().bold(),
        AgentRole::Con => "CON  ".red().bold(),
        AgentRole::Judge => "JUDGE".cyan().bold(),
    }
}

fn status_label(status: AgentStatus) -> ColoredString {
    match status {
        AgentStatus::Idle => "idle".dimmed(),
        AgentStatus::Thinking => "thinking…".yellow(),
        AgentStatus::Done => "done".green(),
    }
}

fn decision_label(decision: Decision) -> ColoredString {
    match decision {
        Decision::Go => "GO".green().bold(),
        Decision::NoGo => "NO GO".red().bold(),
        Decision::ConditionalGo => "CONDITIONAL GO".yellow().bold(),
    }
}

fn winner_label(winner: Winner) -> ColoredString {
    match winner {
        Winner::Pro => "PRO".green(),
        Winner::Con => "CON".red(),
        Winner::Tie => "TIE".yellow(),
    }
}
