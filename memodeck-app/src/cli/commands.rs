use crate::api::server as api_server;
use crate::cli::opts::*;

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use memodeck_core::{
    filters::{filter_by_tag, filter_by_text, filter_due},
    mastery::{card_is_mastered, status_label},
    progression::{collection_xp, level_info},
    scheduler::record_review,
    stats::dashboard,
    Card, CoreError, Repository, SchedulePolicy,
};
use memodeck_json::JsonStore;
use std::io::{stdin, stdout, Write};
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

pub async fn run_cli(args: Cli) -> Result<()> {
    let policy = schedule_policy(&args)?;
    match &args.cmd {
        Command::Api(api) => {
            let repo = open_repo(args.data_file.clone()).await?;
            let addr: std::net::SocketAddr = api.addr.parse()?;
            api_server::run(repo, policy, addr).await
        }
        _ => {
            let repo = open_repo(args.data_file.clone()).await?;
            match args.cmd.clone() {
                Command::Card(cmd) => card_cmd(repo, cmd, &policy).await,
                Command::Review(cmd) => review_cmd(repo, cmd, &policy).await,
                Command::Stats => stats_cmd(repo).await,
                Command::Profile => profile_cmd(repo, &policy).await,
                Command::Export(cmd) => export_cmd(repo, cmd).await,
                Command::Import(cmd) => import_cmd(repo, cmd).await,
                _ => unreachable!(),
            }
        }
    }
}

pub fn schedule_policy(args: &Cli) -> Result<SchedulePolicy> {
    match args.policy {
        PolicyKind::Exponential => {
            if args.max_days == 0 {
                anyhow::bail!("--max-days must be at least 1");
            }
            Ok(SchedulePolicy::Exponential {
                max_days: args.max_days,
            })
        }
        PolicyKind::Ladder => {
            if args.ladder.is_empty() {
                anyhow::bail!("--ladder must list at least one interval");
            }
            Ok(SchedulePolicy::FixedLadder {
                intervals: args.ladder.clone(),
            })
        }
    }
}

pub async fn open_repo(data_file: Option<PathBuf>) -> Result<Arc<dyn Repository>> {
    match data_file {
        None => {
            let s = JsonStore::open_default().await?;
            Ok(Arc::new(s))
        }
        Some(path) => {
            let backups = path
                .parent()
                .map(|p| p.join("backups"))
                .unwrap_or_else(|| PathBuf::from("backups"));
            let s = JsonStore::open_with(path, backups, 10).await?;
            Ok(Arc::new(s))
        }
    }
}

async fn card_cmd(
    repo: Arc<dyn Repository>,
    cmd: CardCmd,
    policy: &SchedulePolicy,
) -> Result<()> {
    match cmd {
        CardCmd::Add(a) => {
            let c = repo
                .add_card(&a.question, &a.answer, a.source.as_deref(), &a.tags)
                .await?;
            println!("{}", c.id);
        }
        CardCmd::List { tag, text } => {
            let mut cards = repo.list_cards().await?;
            if let Some(t) = tag {
                cards = filter_by_tag(&cards, &t);
            }
            if let Some(q) = text {
                cards = filter_by_text(&cards, &q);
            }
            cards.sort_by_key(|c| c.created_at);
            for c in cards {
                let tags = if c.tags.is_empty() {
                    "-".to_string()
                } else {
                    c.tags.join(";")
                };
                let due = c
                    .next_review_at
                    .map(|t| t.to_rfc3339())
                    .unwrap_or_else(|| "mastered".to_string());
                println!(
                    "{}\t{}\treviews={}\tdue={}\ttags={}",
                    c.id, c.question, c.review_count, due, tags
                );
            }
        }
        CardCmd::Show { card_id } => {
            let id = parse_uuid(&card_id)?;
            let c = repo.get_card(id).await?;
            println!("Q: {}", c.question);
            println!("A: {}", c.answer);
            if let Some(s) = &c.source {
                println!("source: {}", s);
            }
            if let Some(len) = policy.ladder_len() {
                println!("status: {}", status_label(c.review_index, len));
            }
            println!("reviews: {} ({} correct)", c.review_count, c.correct_count());
            match c.next_review_at {
                Some(t) => println!("next due: {}", t.to_rfc3339()),
                None => println!("next due: - (mastered)"),
            }
            for r in &c.review_history {
                let mark = if r.correct { "✓" } else { "✗" };
                println!("  {} {}", mark, r.reviewed_at.to_rfc3339());
            }
        }
        CardCmd::Rm { card_id } => {
            let id = parse_uuid(&card_id)?;
            repo.delete_card(id).await?;
            println!("ok");
        }
        CardCmd::Edit(e) => {
            let id = parse_uuid(&e.card_id)?;
            let mut card = repo.get_card(id).await?;

            if let Some(q) = e.question {
                card.question = q;
            }
            if let Some(a) = e.answer {
                card.answer = a;
            }
            if e.clear_source {
                card.source = None;
            }
            if let Some(s) = e.source {
                card.source = Some(s);
            }

            if !e.add_tags.is_empty() || !e.rm_tags.is_empty() {
                let mut tags = card.tags.clone();
                for t in e.add_tags {
                    if !tags.iter().any(|x| x.eq_ignore_ascii_case(&t)) {
                        tags.push(t);
                    }
                }
                if !e.rm_tags.is_empty() {
                    tags.retain(|x| !e.rm_tags.iter().any(|r| x.eq_ignore_ascii_case(r)));
                }
                card.tags = tags;
            }

            let _ = repo.update_card(&card).await?;
            println!("ok");
        }
    }
    Ok(())
}

async fn review_cmd(
    repo: Arc<dyn Repository>,
    cmd: ReviewCmd,
    policy: &SchedulePolicy,
) -> Result<()> {
    let now = Utc::now();

    let cards = repo.list_cards().await?;
    let pool = due_pool(&cards, now, cmd.max);
    if pool.is_empty() {
        println!("no cards due");
        return Ok(());
    }

    let total = pool.len();
    let mut shown = 0usize;
    let mut graded = 0usize;
    for card in pool {
        shown += 1;
        println!("\n[{}/{}] {}", shown, total, card.id);
        println!("Q: {}", card.question);

        let user_answer = if cmd.typed {
            let a = read_line("your answer> ")?;
            let a = a.trim().to_string();
            if a.is_empty() {
                None
            } else {
                Some(a)
            }
        } else {
            prompt_enter("[enter=show]")?;
            None
        };

        println!("A: {}", card.answer);
        println!("[y=correct, n=incorrect, s=skip, q=quit]");
        let correct = loop {
            let line = read_line("grade> ")?;
            match line.trim().to_lowercase().as_str() {
                "y" | "yes" | "correct" => break Some(true),
                "n" | "no" | "wrong" => break Some(false),
                "s" | "skip" => break None,
                "q" | "quit" => return Ok(()),
                _ => {
                    println!("enter y/n, s, or q");
                }
            }
        };

        if let Some(correct) = correct {
            let out = record_review(card, correct, user_answer, Utc::now(), policy)?;
            repo.update_card(&out.updated_card).await?;
            graded += 1;
            match out.updated_card.next_review_at {
                Some(t) => println!("→ next due {}", t.to_rfc3339()),
                None => println!("→ mastered!"),
            }
        }
    }

    println!("\nreviewed {}", graded);
    Ok(())
}

/// Due cards only, soonest first, capped at `max`.
fn due_pool(cards: &[Card], now: DateTime<Utc>, max: usize) -> Vec<Card> {
    let mut pool = filter_due(cards, now);
    pool.sort_by_key(|c| (c.next_review_at, c.created_at));
    pool.truncate(max);
    pool
}

async fn stats_cmd(repo: Arc<dyn Repository>) -> Result<()> {
    let cards = repo.list_cards().await?;
    let d = dashboard(&cards, Utc::now());
    println!("cards:        {}", d.total_cards);
    println!("due today:    {}", d.due_today);
    println!("reviews:      {}", d.total_reviews);
    println!("accuracy:     {:.0}%", d.average_accuracy * 100.0);
    println!("day streak:   {}", d.day_streak);
    Ok(())
}

async fn profile_cmd(repo: Arc<dyn Repository>, policy: &SchedulePolicy) -> Result<()> {
    let cards = repo.list_cards().await?;
    let xp = collection_xp(&cards);
    let info = level_info(xp);
    println!("level {} — {}", info.level, info.title);
    println!(
        "xp: {}/{} toward next level ({:.0}%)",
        info.current_xp, info.next_level_xp, info.progress
    );
    println!("total xp: {}", xp);
    if policy.ladder_len().is_some() {
        let mastered = cards
            .iter()
            .filter(|c| card_is_mastered(c, policy))
            .count();
        println!("mastered: {}/{}", mastered, cards.len());
    }
    Ok(())
}

async fn export_cmd(repo: Arc<dyn Repository>, cmd: ExportCmd) -> Result<()> {
    match cmd {
        ExportCmd::Json { path } => {
            let mut cards = repo.list_cards().await?;
            cards.sort_by_key(|c| c.created_at);
            let bundle = ExportBundle { version: 1, cards };
            let s = serde_json::to_string_pretty(&bundle)?;
            std::fs::write(&path, s)?;
            println!("wrote {}", path.display());
        }
        ExportCmd::Csv { path } => {
            let mut cards = repo.list_cards().await?;
            cards.sort_by_key(|c| c.created_at);

            let mut wtr = csv::Writer::from_path(&path)?;
            wtr.write_record(["question", "answer", "source", "tags"])?;
            for c in cards {
                let tags = if c.tags.is_empty() {
                    "".to_string()
                } else {
                    c.tags.join(";")
                };
                wtr.write_record([
                    c.question,
                    c.answer,
                    c.source.unwrap_or_default(),
                    tags,
                ])?;
            }
            wtr.flush()?;
            println!("wrote {}", path.display());
        }
    }
    Ok(())
}

async fn import_cmd(repo: Arc<dyn Repository>, cmd: ImportCmd) -> Result<()> {
    let rows = match cmd {
        ImportCmd::Json { path } => {
            let data = std::fs::read_to_string(&path)?;
            let bundle: ExportBundle = serde_json::from_str(&data)?;
            bundle
                .cards
                .into_iter()
                .map(|c| ImportRow {
                    question: c.question,
                    answer: c.answer,
                    source: c.source,
                    tags: c.tags,
                })
                .collect::<Vec<_>>()
        }
        ImportCmd::Csv { path } => {
            let mut rdr = csv::Reader::from_path(&path)?;
            let mut rows = Vec::new();
            for rec in rdr.records() {
                let rec = rec?;
                rows.push(ImportRow {
                    question: rec.get(0).unwrap_or("").to_string(),
                    answer: rec.get(1).unwrap_or("").to_string(),
                    source: rec.get(2).map(|s| s.to_string()).filter(|s| !s.is_empty()),
                    tags: rec
                        .get(3)
                        .unwrap_or("")
                        .split(';')
                        .filter(|s| !s.is_empty())
                        .map(|s| s.to_string())
                        .collect(),
                });
            }
            rows
        }
    };

    let (imported, skipped) = import_rows(&*repo, rows).await?;
    println!("imported {imported}, skipped {skipped}");
    Ok(())
}

struct ImportRow {
    question: String,
    answer: String,
    source: Option<String>,
    tags: Vec<String>,
}

/// Adds each row, skipping duplicate questions; any other failure aborts.
async fn import_rows<R: Repository + ?Sized>(
    repo: &R,
    rows: Vec<ImportRow>,
) -> Result<(usize, usize)> {
    let mut imported = 0usize;
    let mut skipped = 0usize;
    for r in rows {
        match repo
            .add_card(&r.question, &r.answer, r.source.as_deref(), &r.tags)
            .await
        {
            Ok(_) => imported += 1,
            Err(CoreError::DuplicateQuestion(_)) => skipped += 1,
            Err(e) => return Err(e.into()),
        }
    }
    Ok((imported, skipped))
}

// ===== Helpers =====
fn parse_uuid(s: &str) -> Result<uuid::Uuid> {
    Uuid::parse_str(s).map_err(|_| anyhow!("invalid uuid"))
}

fn prompt_enter(label: &str) -> Result<()> {
    print!("{label}");
    stdout().flush().ok();
    let mut s = String::new();
    stdin().read_line(&mut s)?;
    Ok(())
}

fn read_line(prompt: &str) -> Result<String> {
    print!("{prompt}");
    stdout().flush().ok();
    let mut s = String::new();
    stdin().read_line(&mut s)?;
    Ok(s)
}

#[derive(serde::Serialize, serde::Deserialize)]
struct ExportBundle {
    version: u32,
    cards: Vec<Card>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use memodeck_core::repo::memory::MemoryRepo;

    fn row(question: &str) -> ImportRow {
        ImportRow {
            question: question.to_string(),
            answer: "a".to_string(),
            source: None,
            tags: Vec::new(),
        }
    }

    #[tokio::test]
    async fn import_skips_duplicates_and_reports_counts() {
        let repo = MemoryRepo::new();
        // "HOLA" collides case-insensitively with "hola".
        let rows = vec![row("hola"), row("adios"), row("HOLA")];

        let (imported, skipped) = import_rows(&repo, rows).await.unwrap();
        assert_eq!(imported, 2);
        assert_eq!(skipped, 1);
        assert_eq!(repo.list_cards().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn import_continues_past_a_duplicate() {
        let repo = MemoryRepo::new();
        let rows = vec![row("a"), row("a"), row("b")];

        let (imported, skipped) = import_rows(&repo, rows).await.unwrap();
        assert_eq!(imported, 2);
        assert_eq!(skipped, 1);
    }

    #[test]
    fn due_pool_orders_by_due_date_and_caps_at_max() {
        let now = Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap();

        let mut later = Card::new("later", "x");
        later.next_review_at = Some(now - Duration::hours(1));
        let mut sooner = Card::new("sooner", "x");
        sooner.next_review_at = Some(now - Duration::days(2));
        let mut future = Card::new("future", "x");
        future.next_review_at = Some(now + Duration::days(1));
        let mut mastered = Card::new("mastered", "x");
        mastered.next_review_at = None;

        let cards = vec![later, sooner, future, mastered];

        let pool = due_pool(&cards, now, 50);
        assert_eq!(pool.len(), 2);
        assert_eq!(pool[0].question, "sooner");
        assert_eq!(pool[1].question, "later");

        let capped = due_pool(&cards, now, 1);
        assert_eq!(capped.len(), 1);
        assert_eq!(capped[0].question, "sooner");
    }
}
