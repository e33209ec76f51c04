use tracing::debug;

const USE_PREFIX: &str = "Use:";
const USED_BY_PREFIX: &str = "Usado por:";
const STATUS_PREFIX: &str = "Situação:";

/// One thesaurus entry as it appears in the source, before authority
/// resolution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryBlock {
    /// The entry's own label (first non-empty, non-keyed line).
    pub label: String,
    /// "Use:" redirect target, when the label is not authoritative.
    pub use_target: Option<String>,
    /// "Usado por:" aliases, already split on commas.
    pub used_by: Vec<String>,
}

impl EntryBlock {
    fn has_content(&self) -> bool {
        !self.label.is_empty() || self.use_target.is_some() || !self.used_by.is_empty()
    }
}

enum SplitState {
    AwaitingLabel,
    InBlockBody,
}

/// Splits raw thesaurus text into entry blocks.
///
/// Real exports mix boundary signals: some entries end with a
/// "Situação:" status line, some are separated only by blank lines, and
/// blank lines also appear inside entries. A status line is the reliable
/// terminator, so it always closes the block; a blank line closes the
/// block only once a label has been seen. Blocks that never produce a
/// label are dropped here, not reported.
pub fn split_blocks(raw: &str) -> Vec<EntryBlock> {
    let mut blocks = Vec::new();
    let mut current = EntryBlock::default();
    let mut state = SplitState::AwaitingLabel;

    for line in raw.lines() {
        let line = line.trim();

        if line.is_empty() {
            if matches!(state, SplitState::InBlockBody) {
                finish_block(&mut blocks, std::mem::take(&mut current));
                state = SplitState::AwaitingLabel;
            }
            continue;
        }

        if let Some(rest) = line.strip_prefix(STATUS_PREFIX) {
            debug!("Block '{}' closed with status '{}'", current.label, rest.trim());
            finish_block(&mut blocks, std::mem::take(&mut current));
            state = SplitState::AwaitingLabel;
            continue;
        }

        if let Some(target) = line.strip_prefix(USE_PREFIX) {
            current.use_target = Some(target.trim().to_string());
            state = SplitState::InBlockBody;
            continue;
        }

        if let Some(aliases) = line.strip_prefix(USED_BY_PREFIX) {
            current.used_by.extend(
                aliases
                    .split(',')
                    .map(str::trim)
                    .filter(|a| !a.is_empty())
                    .map(String::from),
            );
            state = SplitState::InBlockBody;
            continue;
        }

        match state {
            SplitState::AwaitingLabel if !line.contains(':') => {
                current.label = line.to_string();
                state = SplitState::InBlockBody;
            }
            // "Def.:" lines and any other "key: value" metadata.
            _ => debug!("Ignoring line: {}", crate::safe_truncate_ellipsis(line, 60)),
        }
    }

    finish_block(&mut blocks, current);
    blocks
}

fn finish_block(blocks: &mut Vec<EntryBlock>, block: EntryBlock) {
    if block.has_content() {
        blocks.push(block);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_line_terminates_block() {
        let raw = "Peculato\nDef.: crime funcional\nSituação: Ativo\nLegislação\nSituação: Ativo\n";
        let blocks = split_blocks(raw);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].label, "Peculato");
        assert_eq!(blocks[1].label, "Legislação");
    }

    #[test]
    fn test_blank_line_terminates_block() {
        let raw = "Peculato\n\nLegislação\n";
        let blocks = split_blocks(raw);
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn test_use_and_used_by_lines() {
        let raw = "Norma\nDef.: ...\nUse: Legislação\nUsado por: regra, preceito legal\nSituação: Ativo\n";
        let blocks = split_blocks(raw);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].label, "Norma");
        assert_eq!(blocks[0].use_target.as_deref(), Some("Legislação"));
        assert_eq!(blocks[0].used_by, vec!["regra", "preceito legal"]);
    }

    #[test]
    fn test_multiple_used_by_lines_accumulate() {
        let raw = "Peculato\nUsado por: desvio de verba\nUsado por: furto de recurso público\nSituação: Ativo\n";
        let blocks = split_blocks(raw);
        assert_eq!(
            blocks[0].used_by,
            vec!["desvio de verba", "furto de recurso público"]
        );
    }

    #[test]
    fn test_def_lines_ignored() {
        let raw = "Peculato\nDef.: apropriação de bens públicos\nSituação: Ativo\n";
        let blocks = split_blocks(raw);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].label, "Peculato");
        assert!(blocks[0].use_target.is_none());
        assert!(blocks[0].used_by.is_empty());
    }

    #[test]
    fn test_trailing_block_without_terminator() {
        let raw = "Peculato\nUsado por: desvio de verba";
        let blocks = split_blocks(raw);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].used_by, vec!["desvio de verba"]);
    }

    #[test]
    fn test_block_without_label_still_produced_when_it_has_aliases() {
        // Malformed entry: aliases but no label line. The parser decides
        // whether it is usable, not the splitter.
        let raw = "Use: Legislação\nSituação: Ativo\n";
        let blocks = split_blocks(raw);
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].label.is_empty());
    }

    #[test]
    fn test_empty_input_yields_no_blocks() {
        assert!(split_blocks("").is_empty());
        assert!(split_blocks("\n\n  \n").is_empty());
    }
}
