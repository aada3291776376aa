//! Interactive command shell
//!
//! Reads commands line by line from any `BufRead` and writes everything to
//! any `Write`, so a whole session can be scripted in tests.

use ss_core::{
    Competitor, GameResult, LeagueConfig, LeagueError, LeagueState, OutcomeResolver, SaveManager,
    ScheduleType, SeasonPhase, Slot,
};
use std::io::{self, BufRead, Write};

pub const PROMPT: &str = "season-sim> ";
pub const TEAM_PROMPT: &str = "Team info (type DONE to finish adding teams)-> ";
pub const LEAGUE_TYPE_PROMPT: &str = "What type of league would you like? RR, DRR, or SE? ";

const RULE: &str = "--------------------------------------------------";

const HELP: &str = "\
Commands:
  n, new          set up a new league
  c, check        list teams and this week's matchups
  s, sim          simulate the current week
  season          simulate the rest of the season
  t, table        show the standings
  save <name>     save the league
  load <name>     load a saved league
  h, help         show this help
  q, quit         exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub struct Shell<R, W> {
    input: R,
    output: W,
    state: LeagueState,
    config: LeagueConfig,
    saves: SaveManager,
    resolver: Box<dyn OutcomeResolver>,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, output: W, config: LeagueConfig) -> Self {
        let saves = SaveManager::new(config.save_dir.clone());
        let resolver = config.build_resolver();
        Self { input, output, state: LeagueState::new(), config, saves, resolver }
    }

    pub fn state(&self) -> &LeagueState {
        &self.state
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs until `quit` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "Welcome to season sim! Type h for help.")?;

        while let Some(line) = self.prompt(PROMPT)? {
            if self.dispatch(&line)? == Flow::Quit {
                break;
            }
        }

        writeln!(self.output, "Goodbye")?;
        self.output.flush()
    }

    fn dispatch(&mut self, line: &str) -> io::Result<Flow> {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Ok(Flow::Continue);
        };
        let argument = words.next();

        match command.to_ascii_lowercase().as_str() {
            "n" | "new" => self.new_league()?,
            "c" | "check" => self.check()?,
            "s" | "sim" => self.sim_week()?,
            "season" => self.sim_season()?,
            "t" | "table" => self.table()?,
            "save" => self.save(argument)?,
            "load" => self.load(argument)?,
            "h" | "help" => writeln!(self.output, "{}", HELP)?,
            "q" | "quit" => return Ok(Flow::Quit),
            other => writeln!(self.output, "Unknown command '{}', type h for help", other)?,
        }
        Ok(Flow::Continue)
    }

    /// Writes `prompt` and reads one trimmed line; `None` at end of input.
    fn prompt(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    // ========================
    // League setup
    // ========================

    fn new_league(&mut self) -> io::Result<()> {
        if self.state.is_active() {
            writeln!(self.output, "League already in progress, use (c) or (check) to check state")?;
            return Ok(());
        }

        writeln!(self.output, "Beginning league setup")?;
        writeln!(self.output, "Enter one team per line as: <name> <offense> <defense>")?;

        // Built aside and committed only once scheduled
        let mut league = LeagueState::new();
        loop {
            let Some(line) = self.prompt(TEAM_PROMPT)? else {
                writeln!(self.output, "League setup abandoned")?;
                return Ok(());
            };
            if line.eq_ignore_ascii_case("done") {
                break;
            }
            if line.is_empty() {
                continue;
            }

            match parse_team(&line) {
                Ok(team) => {
                    if let Err(err) = league.add_competitor(team) {
                        writeln!(self.output, "{}", err)?;
                    }
                }
                Err(message) => writeln!(self.output, "{}", message)?,
            }
        }

        if league.competitors().len() < 2 {
            writeln!(self.output, "A league needs at least 2 teams, setup abandoned")?;
            return Ok(());
        }

        loop {
            let Some(line) = self.prompt(LEAGUE_TYPE_PROMPT)? else {
                writeln!(self.output, "League setup abandoned")?;
                return Ok(());
            };

            let scheduled = line
                .parse::<ScheduleType>()
                .and_then(|kind| league.schedule_season(kind));
            match scheduled {
                Ok(()) => break,
                Err(err) => writeln!(self.output, "{}", err)?,
            }
        }

        writeln!(
            self.output,
            "League scheduled: {} teams over {} weeks",
            league.competitors().len(),
            league.total_weeks()
        )?;
        self.state = league;
        Ok(())
    }

    // ========================
    // Queries
    // ========================

    fn check(&mut self) -> io::Result<()> {
        if !self.require_league()? {
            return Ok(());
        }

        writeln!(self.output, "Teams")?;
        writeln!(self.output, "{}", RULE)?;
        for team in self.state.competitors() {
            writeln!(self.output, "{}", team.name)?;
        }

        let week = self.state.current_week();
        match self.state.phase() {
            SeasonPhase::Unscheduled => writeln!(self.output, "\nNo schedule yet")?,
            SeasonPhase::Complete => {
                writeln!(self.output, "\nSeason complete after {} weeks", self.state.total_weeks())?
            }
            SeasonPhase::Scheduled | SeasonPhase::InProgress => {
                writeln!(self.output, "\nSchedule for Week {}", week)?;
                writeln!(self.output, "{}", RULE)?;
                for (home, away) in self.state.week_matchups(week) {
                    writeln!(self.output, "{} vs. {}", home.name, away.name)?;
                }
                if let Some(index) = self.bye_team(week) {
                    writeln!(self.output, "Bye: {}", self.state.competitors()[index].name)?;
                }
            }
        }
        Ok(())
    }

    fn bye_team(&self, week: u32) -> Option<usize> {
        self.state.week_pairings(week)?.iter().find(|p| p.is_bye()).and_then(|p| match p.home {
            Slot::Team(index) => Some(index),
            Slot::Bye => p.away.team(),
        })
    }

    fn table(&mut self) -> io::Result<()> {
        if !self.require_league()? {
            return Ok(());
        }

        writeln!(
            self.output,
            "{:>3}  {:<20} {:>3} {:>3} {:>3} {:>4}",
            "Pos", "Team", "W", "L", "T", "Pts"
        )?;
        writeln!(self.output, "{}", RULE)?;
        for row in self.state.standings(&self.config.points) {
            writeln!(
                self.output,
                "{:>3}  {:<20} {:>3} {:>3} {:>3} {:>4}",
                row.position,
                row.name,
                row.record.wins,
                row.record.losses,
                row.record.ties,
                row.points
            )?;
        }
        Ok(())
    }

    // ========================
    // Simulation
    // ========================

    fn sim_week(&mut self) -> io::Result<()> {
        if !self.require_league()? {
            return Ok(());
        }

        let week = self.state.current_week();
        match self.state.simulate_current_week(self.resolver.as_mut()) {
            Ok(games) => self.write_week(week, &games),
            Err(err) => self.report(err),
        }
    }

    fn sim_season(&mut self) -> io::Result<()> {
        if !self.require_league()? {
            return Ok(());
        }
        if self.state.phase() == SeasonPhase::Complete {
            return self.report(LeagueError::EndOfSeason {
                requested: self.state.current_week(),
                total_weeks: self.state.total_weeks(),
            });
        }

        match self.state.simulate_season(self.resolver.as_mut()) {
            Ok(season) => {
                for week in &season {
                    self.write_week(week.week, &week.games)?;
                }
                writeln!(self.output, "Season complete after {} weeks", self.state.total_weeks())
            }
            Err(err) => self.report(err),
        }
    }

    fn write_week(&mut self, week: u32, games: &[GameResult]) -> io::Result<()> {
        writeln!(self.output, "Week {} results", week)?;
        writeln!(self.output, "{}", RULE)?;
        for game in games {
            writeln!(self.output, "{}", format_result(game))?;
        }
        Ok(())
    }

    // ========================
    // Persistence
    // ========================

    fn save(&mut self, name: Option<&str>) -> io::Result<()> {
        let Some(name) = name else {
            return writeln!(self.output, "Usage: save <name>");
        };
        if !self.require_league()? {
            return Ok(());
        }

        match self.saves.save(&self.state, name) {
            Ok(path) => writeln!(self.output, "Saved to {}", path.display()),
            Err(err) => writeln!(self.output, "Save failed: {}", err),
        }
    }

    fn load(&mut self, name: Option<&str>) -> io::Result<()> {
        let Some(name) = name else {
            return writeln!(self.output, "Usage: load <name>");
        };

        match self.saves.load_into(name, &mut self.state) {
            Ok(()) => writeln!(
                self.output,
                "Loaded '{}' at week {} of {}",
                name,
                self.state.current_week(),
                self.state.total_weeks()
            ),
            Err(err) => {
                if !err.is_recoverable() {
                    tracing::warn!(save = name, error = %err, "save file rejected");
                }
                writeln!(self.output, "Load failed: {}", err)
            }
        }
    }

    fn require_league(&mut self) -> io::Result<bool> {
        if self.state.is_active() {
            return Ok(true);
        }
        writeln!(self.output, "No league loaded")?;
        Ok(false)
    }

    fn report(&mut self, err: LeagueError) -> io::Result<()> {
        match err {
            LeagueError::EndOfSeason { total_weeks, .. } => {
                writeln!(self.output, "The season is over ({} weeks played)", total_weeks)
            }
            other => writeln!(self.output, "{}", other),
        }
    }
}

/// Parses `<name> <offense> <defense>`.
fn parse_team(line: &str) -> Result<Competitor, String> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let [name, offense, defense] = parts.as_slice() else {
        return Err("Must input 3 attributes to insert a new team".to_string());
    };

    let (Ok(offense), Ok(defense)) = (offense.parse::<f64>(), defense.parse::<f64>()) else {
        return Err("Attributes 2 and 3 (offense and defense) must be numeric".to_string());
    };
    Ok(Competitor::new(*name, offense, defense))
}

fn format_result(game: &GameResult) -> String {
    format!("{} {} - {} {}", game.home, game.home_score, game.away_score, game.away)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ss_core::ResolverKind;
    use tempfile::TempDir;

    const FIVE_TEAMS: &str = "n\nA 5 3\nB 4 4\nC 2 6\nD 7 1\nE 3 3\nDONE\nRR\n";

    fn config(dir: &TempDir) -> LeagueConfig {
        LeagueConfig {
            resolver: ResolverKind::HomeWin,
            save_dir: dir.path().to_path_buf(),
            ..Default::default()
        }
    }

    fn run_session(dir: &TempDir, script: &str) -> (LeagueState, String) {
        let mut shell = Shell::new(script.as_bytes(), Vec::new(), config(dir));
        shell.run().unwrap();
        let state = shell.state().clone();
        let output = String::from_utf8(shell.into_output()).unwrap();
        (state, output)
    }

    #[test]
    fn test_new_league_and_check() {
        let dir = TempDir::new().unwrap();
        let (state, output) = run_session(&dir, &format!("{}c\nq\n", FIVE_TEAMS));

        assert!(state.is_active());
        assert_eq!(state.competitors().len(), 5);
        assert_eq!(state.total_weeks(), 5);
        assert!(output.contains("League scheduled: 5 teams over 5 weeks"));
        assert!(output.contains("Schedule for Week 1"));
        assert!(output.contains("A vs. C"));
        assert!(output.contains("B vs. D"));
        assert!(output.contains("Bye: E"));
    }

    #[test]
    fn test_bad_team_lines_are_reported() {
        let dir = TempDir::new().unwrap();
        let script = "new\nA 1\nB x 2\nA 1 1\nA 2 2\nB 1 1\nDONE\nSE\ndrr\nrr\nq\n";
        let (state, output) = run_session(&dir, script);

        assert!(output.contains("Must input 3 attributes to insert a new team"));
        assert!(output.contains("Attributes 2 and 3 (offense and defense) must be numeric"));
        assert!(output.contains("already exists"));
        assert!(output.contains("single elimination schedules are not supported"));
        assert!(output.contains("double round robin schedules are not supported"));
        assert_eq!(state.competitors().len(), 2);
        assert_eq!(state.total_weeks(), 1);
    }

    #[test]
    fn test_too_few_teams_abandons_setup() {
        let dir = TempDir::new().unwrap();
        let (state, output) = run_session(&dir, "n\nSolo 1 1\nDONE\nc\n");

        assert!(output.contains("A league needs at least 2 teams"));
        assert!(output.contains("No league loaded"));
        assert!(!state.is_active());
    }

    #[test]
    fn test_new_refused_while_active() {
        let dir = TempDir::new().unwrap();
        let (state, output) = run_session(&dir, &format!("{}n\nq\n", FIVE_TEAMS));

        assert!(output.contains("League already in progress"));
        assert_eq!(state.competitors().len(), 5);
    }

    #[test]
    fn test_sim_and_table() {
        let dir = TempDir::new().unwrap();
        let (state, output) = run_session(&dir, &format!("{}s\nt\nq\n", FIVE_TEAMS));

        assert_eq!(state.current_week(), 2);
        assert!(output.contains("Week 1 results"));
        assert!(output.contains("A 1 - 0 C"));
        assert!(output.contains("B 1 - 0 D"));

        let leader = output.lines().find(|line| line.trim_start().starts_with("1 ")).unwrap();
        assert!(leader.contains('A'), "{}", leader);
    }

    #[test]
    fn test_season_then_end_of_season() {
        let dir = TempDir::new().unwrap();
        let (state, output) = run_session(&dir, &format!("{}season\ns\nseason\nq\n", FIVE_TEAMS));

        assert_eq!(state.phase(), SeasonPhase::Complete);
        assert!(output.contains("Week 5 results"));
        assert!(output.contains("Season complete after 5 weeks"));
        assert_eq!(output.matches("The season is over (5 weeks played)").count(), 2);
        assert!(state.competitors().iter().all(|c| c.record.games_played() == 4));
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let script = format!("{}s\nsave week2\ns\ns\nload week2\nload missing\nq\n", FIVE_TEAMS);
        let (state, output) = run_session(&dir, &script);

        assert!(dir.path().join("week2.json").exists());
        assert!(output.contains("Loaded 'week2' at week 2 of 5"));
        assert!(output.contains("Load failed"));
        assert_eq!(state.current_week(), 2);
        assert_eq!(state.competitor(0).unwrap().record.wins, 1);
    }

    #[test]
    fn test_load_from_fresh_shell() {
        let dir = TempDir::new().unwrap();
        run_session(&dir, &format!("{}season\nsave done\nq\n", FIVE_TEAMS));

        let (state, output) = run_session(&dir, "load done\nt\nq\n");
        assert!(state.is_active());
        assert_eq!(state.phase(), SeasonPhase::Complete);
        assert!(output.contains("Pts"));
    }

    #[test]
    fn test_commands_without_league() {
        let dir = TempDir::new().unwrap();
        let (_, output) = run_session(&dir, "s\nt\nsave x\nsave\nbogus\nq\n");

        assert_eq!(output.matches("No league loaded").count(), 3);
        assert!(output.contains("Usage: save <name>"));
        assert!(output.contains("Unknown command 'bogus'"));
        assert!(!dir.path().join("x.json").exists());
    }

    #[test]
    fn test_eof_quits_and_commands_ignore_case() {
        let dir = TempDir::new().unwrap();
        let (_, output) = run_session(&dir, "HELP\nCheck");

        assert!(output.contains("simulate the rest of the season"));
        assert!(output.contains("No league loaded"));
        assert!(output.ends_with("Goodbye\n"));
    }

    #[test]
    fn test_parse_team() {
        let team = parse_team("Hawks 4.5 2").unwrap();
        assert_eq!(team.name, "Hawks");
        assert_eq!(team.offense, 4.5);
        assert_eq!(team.defense, 2.0);

        assert!(parse_team("Hawks 4.5").is_err());
        assert!(parse_team("Hawks 4.5 2 1").is_err());
        assert!(parse_team("Hawks fast 2").is_err());
    }
}
