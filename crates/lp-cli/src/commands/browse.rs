//! Browse command
//!
//! Interactive session: nearby list, random pick, filters, and comments.
//! Comments live only as long as the session; the per-place submission
//! cooldown is persisted on disk.

use anyhow::{bail, Result};
use chrono::Utc;
use clap::Args;
use console::Term;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, MultiSelect, Password, Select};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::context::{AppContext, DataArgs, FilterArgs};
use super::render;
use lp_core::comment::{random_nickname, CommentCooldown, CommentModerator, MemoryCommentStore};
use lp_core::place::{categories, pick_random, top_n, FilterCriteria, Pick, RankedPlace, RngSource};
use lp_core::types::PlaceId;
use lp_storage::FileCooldownStore;

/// Arguments for the browse command
#[derive(Debug, Args)]
pub struct BrowseArgs {
    #[command(flatten)]
    pub data: DataArgs,

    #[command(flatten)]
    pub filter: FilterArgs,

    /// Enable comment deletion (prompts for the admin password)
    #[arg(long)]
    pub admin: bool,

    /// Directory for client-side state such as comment cooldowns
    #[arg(long)]
    pub state_dir: Option<PathBuf>,
}

/// Execute the browse command
pub fn execute(args: BrowseArgs, config_path: &Path) -> Result<()> {
    if !Term::stdout().is_term() {
        bail!("browse needs an interactive terminal; use 'rank' or 'pick' instead");
    }

    let ctx = AppContext::load(config_path, &args.data)?;
    let criteria = args.filter.to_criteria(&ctx.config)?;

    let cooldown_store = match &args.state_dir {
        Some(dir) => FileCooldownStore::new(dir)?,
        None => FileCooldownStore::default_location()?,
    };
    let cooldown = CommentCooldown::from_config(&ctx.config, cooldown_store);
    let moderator = CommentModerator::from_config(&ctx.config, MemoryCommentStore::new());

    let theme = ColorfulTheme::default();
    let admin_password = if args.admin {
        Some(
            Password::with_theme(&theme)
                .with_prompt("Admin password")
                .allow_empty_password(true)
                .interact()?,
        )
    } else {
        None
    };

    let mut session = BrowseSession {
        ctx,
        criteria,
        moderator,
        cooldown,
        admin_password,
        nicknames: HashMap::new(),
        rng: RngSource::thread(),
        theme,
    };
    session.run()
}

struct BrowseSession {
    ctx: AppContext,
    criteria: FilterCriteria,
    moderator: CommentModerator,
    cooldown: CommentCooldown<FileCooldownStore>,
    admin_password: Option<String>,
    nicknames: HashMap<PlaceId, String>,
    rng: RngSource<rand::rngs::ThreadRng>,
    theme: ColorfulTheme,
}

impl BrowseSession {
    fn run(&mut self) -> Result<()> {
        use colored::Colorize;

        loop {
            let ranked = self.ctx.rank(&self.criteria);

            println!();
            println!(
                "{}",
                format!(
                    "Within {}m of {} · {} places",
                    self.criteria.radius_meters,
                    self.ctx.config.origin.label,
                    ranked.len()
                )
                .bold()
            );
            for (index, place) in top_n(&ranked, self.ctx.config.ranking.preview_n).iter().enumerate() {
                println!("{}", render::place_line(index, place, &self.ctx, Utc::now()));
            }

            let choice = Select::with_theme(&self.theme)
                .with_prompt("What now?")
                .items(&[
                    "Nearby places",
                    "Random pick",
                    "Change radius",
                    "Filter categories",
                    "Search by name",
                    "Quit",
                ])
                .default(0)
                .interact()?;

            match choice {
                0 => self.nearby(&ranked)?,
                1 => self.random_pick(&ranked)?,
                2 => self.choose_radius()?,
                3 => self.choose_categories()?,
                4 => self.edit_search()?,
                _ => break,
            }
        }

        Ok(())
    }

    fn nearby(&mut self, ranked: &[RankedPlace]) -> Result<()> {
        if ranked.is_empty() {
            println!("No places match the current filters.");
            return Ok(());
        }

        let shown = top_n(ranked, self.ctx.config.ranking.top_n);
        let now = Utc::now();
        let mut items: Vec<String> = shown
            .iter()
            .enumerate()
            .map(|(index, place)| render::place_line(index, place, &self.ctx, now))
            .collect();
        items.push("Back".to_string());

        let choice = Select::with_theme(&self.theme)
            .with_prompt("Nearby places")
            .items(&items)
            .default(0)
            .interact()?;

        if let Some(place) = shown.get(choice) {
            self.place_menu(place)?;
        }
        Ok(())
    }

    fn random_pick(&mut self, ranked: &[RankedPlace]) -> Result<()> {
        match pick_random(ranked, &mut self.rng) {
            Pick::NoCandidates => {
                println!("No places match the current filters.");
                Ok(())
            }
            Pick::Chosen(place) => {
                println!();
                println!("{}", render::place_detail(place, &self.ctx));
                let open = Confirm::with_theme(&self.theme)
                    .with_prompt("Open this place?")
                    .default(true)
                    .interact()?;
                if open {
                    self.place_menu(place)?;
                }
                Ok(())
            }
        }
    }

    fn place_menu(&mut self, place: &RankedPlace) -> Result<()> {
        let mut actions = vec!["Read comments", "Write comment"];
        if self.admin_password.is_some() {
            actions.push("Delete comment");
        }
        actions.push("Back");

        loop {
            println!();
            println!("{}", render::place_detail(place, &self.ctx));

            let choice = Select::with_theme(&self.theme)
                .with_prompt(place.name.as_str())
                .items(&actions)
                .default(0)
                .interact()?;

            match actions[choice] {
                "Read comments" => self.show_comments(place)?,
                "Write comment" => self.write_comment(place)?,
                "Delete comment" => self.delete_comment(place)?,
                _ => return Ok(()),
            }
        }
    }

    fn show_comments(&self, place: &RankedPlace) -> Result<()> {
        let comments = self.moderator.list_comments(place.id.as_str())?;
        if comments.is_empty() {
            println!("No comments yet. Be the first!");
            return Ok(());
        }
        let now = Utc::now();
        for comment in &comments {
            println!("{}", render::comment_line(comment, now));
        }
        Ok(())
    }

    fn write_comment(&mut self, place: &RankedPlace) -> Result<()> {
        use colored::Colorize;

        let place_id = place.id.as_str();
        if let Some(remaining) = self.cooldown.remaining(place_id, Utc::now())? {
            println!(
                "{} You can comment here again in {}s.",
                "⏳".yellow(),
                remaining.num_seconds().max(1)
            );
            return Ok(());
        }

        let nickname = self
            .nicknames
            .entry(place.id.clone())
            .or_insert_with(|| random_nickname(&mut self.rng))
            .clone();

        let content: String = Input::with_theme(&self.theme)
            .with_prompt(format!(
                "{} (max {} chars)",
                nickname, self.ctx.config.comments.max_length
            ))
            .allow_empty(true)
            .interact_text()?;
        let content = content.trim();
        if content.is_empty() {
            return Ok(());
        }

        match self.moderator.add_comment(place_id, &nickname, content) {
            Ok(_) => {
                self.cooldown.record_submission(place_id, Utc::now())?;
                println!("{} Comment posted.", "✓".green());
            }
            Err(err) if err.is_client_error() => println!("{} {}", "✗".red(), err),
            Err(err) => return Err(err.into()),
        }
        Ok(())
    }

    fn delete_comment(&self, place: &RankedPlace) -> Result<()> {
        use colored::Colorize;

        let comments = self.moderator.list_comments(place.id.as_str())?;
        if comments.is_empty() {
            println!("No comments to delete.");
            return Ok(());
        }

        let now = Utc::now();
        let mut items: Vec<String> = comments
            .iter()
            .map(|comment| render::comment_line(comment, now))
            .collect();
        items.push("Back".to_string());

        let choice = Select::with_theme(&self.theme)
            .with_prompt("Delete which comment?")
            .items(&items)
            .interact()?;
        let Some(comment) = comments.get(choice) else {
            return Ok(());
        };

        let confirmed = Confirm::with_theme(&self.theme)
            .with_prompt("Delete this comment?")
            .default(false)
            .interact()?;
        if !confirmed {
            return Ok(());
        }

        match self.moderator.delete_comment(
            place.id.as_str(),
            &comment.id,
            self.admin_password.as_deref(),
        ) {
            Ok(()) => println!("{} Comment deleted.", "✓".green()),
            Err(err) if err.is_client_error() => println!("{} {}", "✗".red(), err),
            Err(err) => return Err(err.into()),
        }
        Ok(())
    }

    fn choose_radius(&mut self) -> Result<()> {
        let options = &self.ctx.config.ranking.radius_options;
        let items: Vec<String> = options.iter().map(|r| format!("{}m", r)).collect();
        let current = options
            .iter()
            .position(|r| *r == self.criteria.radius_meters)
            .unwrap_or(0);

        let choice = Select::with_theme(&self.theme)
            .with_prompt("Radius")
            .items(&items)
            .default(current)
            .interact()?;

        self.criteria.radius_meters = options[choice];
        Ok(())
    }

    fn choose_categories(&mut self) -> Result<()> {
        let all = categories(&self.ctx.catalog.places);
        if all.is_empty() {
            println!("No categories found.");
            return Ok(());
        }

        let checked: Vec<bool> = all
            .iter()
            .map(|category| self.criteria.selected_categories.contains(category))
            .collect();

        let selected = MultiSelect::with_theme(&self.theme)
            .with_prompt("Categories (none selected = all)")
            .items(&all)
            .defaults(&checked)
            .interact()?;

        self.criteria.selected_categories = selected.into_iter().map(|i| all[i].clone()).collect();
        Ok(())
    }

    fn edit_search(&mut self) -> Result<()> {
        let term: String = Input::with_theme(&self.theme)
            .with_prompt("Search (empty clears)")
            .with_initial_text(self.criteria.search_term.clone())
            .allow_empty(true)
            .interact_text()?;
        self.criteria.search_term = term;
        Ok(())
    }
}
