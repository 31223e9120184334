//! Interactive team and channel selection

use std::io::{BufRead, Write};

use crate::error::{Error, Result};
use crate::prompt::Prompter;
use crate::types::{Channel, Team};

/// Answer selecting every listed channel
pub const ALL_CHANNELS: &str = "all";

/// Parse a single index into a list of `len` entries
pub fn parse_index(input: &str, len: usize) -> Result<usize> {
    let index: usize = input
        .trim()
        .parse()
        .map_err(|_| Error::input(format!("\"{}\" is not an index", input.trim())))?;
    if index >= len {
        return Err(Error::input(format!(
            "Index {index} is out of range (0-{})",
            len.saturating_sub(1)
        )));
    }
    Ok(index)
}

/// Parse `all` or a comma-separated list of indices into a list of `len`
/// entries. Spaces are ignored and the order of the answer is kept.
pub fn parse_selection(input: &str, len: usize) -> Result<Vec<usize>> {
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.eq_ignore_ascii_case(ALL_CHANNELS) {
        return Ok((0..len).collect());
    }
    compact.split(',').map(|part| parse_index(part, len)).collect()
}

/// Show the teams and ask for one of them
pub fn select_team<'a, R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    teams: &'a [Team],
) -> Result<&'a Team> {
    if teams.is_empty() {
        return Err(Error::input("The user is not a member of any team"));
    }

    prompter.say("Found teams:")?;
    for (i, team) in teams.iter().enumerate() {
        prompter.say(format!("{i}\t{}\t{}", team.label(), team.id))?;
    }

    let answer = prompter.ask("Select team by idx: ")?;
    let team = &teams[parse_index(&answer, teams.len())?];
    tracing::info!("Selected team {}", team.label());
    Ok(team)
}

/// Show the channels and ask which to export
pub fn select_channels<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    channels: &[Channel],
) -> Result<Vec<Channel>> {
    if channels.is_empty() {
        return Err(Error::input("The selected team has no channels"));
    }

    prompter.say("Found channels:")?;
    for (i, channel) in channels.iter().enumerate() {
        prompter.say(format!("{i}\t{}\t{}", channel.display_name, channel.id))?;
    }

    let answer = prompter.ask(&format!(
        "Select channels by idx separated by comma, or \"{ALL_CHANNELS}\": "
    ))?;
    let selected: Vec<Channel> = parse_selection(&answer, channels.len())?
        .into_iter()
        .map(|i| channels[i].clone())
        .collect();

    let names: Vec<&str> = selected.iter().map(|c| c.display_name.as_str()).collect();
    tracing::info!("Selected channel(s): {}", names.join(", "));
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::types::ChannelType;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_parse_selection_list() {
        assert_eq!(parse_selection("0, 2,1", 3).unwrap(), vec![0, 2, 1]);
    }

    #[test]
    fn test_parse_selection_all() {
        assert_eq!(parse_selection(" ALL ", 3).unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_parse_selection_out_of_range() {
        let err = parse_selection("0,3", 3).unwrap_err();
        assert_eq!(err.code, ErrorCode::Input);
    }

    #[test]
    fn test_parse_selection_garbage() {
        assert!(parse_selection("one", 3).is_err());
        assert!(parse_selection("", 3).is_err());
        assert!(parse_selection("1,,2", 3).is_err());
    }

    #[test]
    fn test_select_team() {
        let teams = vec![
            Team::new("t1", "eng", "Engineering"),
            Team::new("t2", "ops", "Operations"),
        ];
        let mut p = prompter("1\n");
        let team = select_team(&mut p, &teams).unwrap();
        assert_eq!(team.id, "t2");

        let output = String::from_utf8(p.into_output()).unwrap();
        assert!(output.contains("0\tEngineering\tt1"));
        assert!(output.contains("1\tOperations\tt2"));
    }

    #[test]
    fn test_select_team_invalid_index_is_fatal() {
        let teams = vec![Team::new("t1", "eng", "Engineering")];
        let mut p = prompter("5\n0\n");
        let err = select_team(&mut p, &teams).unwrap_err();
        assert_eq!(err.code, ErrorCode::Input);
    }

    #[test]
    fn test_select_channels() {
        let channels = vec![
            Channel::new("c1", "alpha", "Alpha", ChannelType::Public),
            Channel::new("c2", "bravo", "Bravo", ChannelType::Public),
        ];
        let mut p = prompter("1\n");
        let selected = select_channels(&mut p, &channels).unwrap();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id, "c2");
    }

    #[test]
    fn test_select_from_nothing() {
        let mut p = prompter("0\n");
        assert!(select_team(&mut p, &[]).is_err());
        assert!(select_channels(&mut p, &[]).is_err());
    }
}
