use std::path::Path;
use tracing::{info, warn};

use crate::core::error::{Result, TesauroError};

use super::authority::AuthorityTable;
use super::blocks::{split_blocks, EntryBlock};

/// Parses raw thesaurus text into an authority table.
///
/// Best-effort: malformed blocks are skipped with a warning, never fatal.
/// Real exports are inconsistent enough that aborting on the first
/// irregular entry would reject the whole vocabulary.
pub fn parse(raw: &str) -> AuthorityTable {
    let blocks = split_blocks(raw);
    let mut table = AuthorityTable::new();
    let mut skipped = 0usize;

    for block in &blocks {
        if !register_block(&mut table, block) {
            skipped += 1;
            warn!(
                "Skipping thesaurus block with no usable label (use={:?}, aliases={})",
                block.use_target,
                block.used_by.len()
            );
        }
    }

    info!(
        "Thesaurus parsed: {} blocks, {} skipped, {} terms, {} phrasings",
        blocks.len(),
        skipped,
        table.term_count(),
        table.len()
    );
    table
}

/// Reads and parses a thesaurus file. Fails with `SourceNotFound` when
/// the file is unreadable; everything past that point is best-effort.
pub fn parse_file(path: impl AsRef<Path>) -> Result<AuthorityTable> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .map_err(|_| TesauroError::SourceNotFound(path.display().to_string()))?;
    Ok(parse(&raw))
}

/// Registers one block into the table. Returns false when the block
/// carries nothing to resolve an authority from.
fn register_block(table: &mut AuthorityTable, block: &EntryBlock) -> bool {
    // "Use:" redirection takes precedence over the block's own label.
    let authority = match (&block.use_target, block.label.is_empty()) {
        (Some(target), _) => target.as_str(),
        (None, false) => block.label.as_str(),
        (None, true) => return false,
    };

    table.register_term(authority);

    if !block.label.is_empty() {
        table.register(&block.label, authority);
    }
    for alias in &block.used_by {
        table.register(alias, authority);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Peculato
Def.: apropriação de bens públicos pelo funcionário
Usado por: desvio de verba, furto de recurso público
Situação: Ativo
Norma
Def.: ...
Use: Legislação
Situação: Ativo
Legislação
Def.: ...
Situação: Ativo
";

    #[test]
    fn test_terms_map_to_themselves() {
        let table = parse(SAMPLE);
        assert_eq!(table.resolve("peculato"), Some("Peculato"));
        assert_eq!(table.resolve("legislação"), Some("Legislação"));
    }

    #[test]
    fn test_used_by_aliases_resolve_to_term() {
        let table = parse(SAMPLE);
        assert_eq!(table.resolve("desvio de verba"), Some("Peculato"));
        assert_eq!(table.resolve("furto de recurso público"), Some("Peculato"));
    }

    #[test]
    fn test_use_redirect_never_maps_to_own_label() {
        let table = parse(SAMPLE);
        assert_eq!(table.resolve("norma"), Some("Legislação"));
        assert_eq!(table.resolve("legislação"), Some("Legislação"));
    }

    #[test]
    fn test_redirect_target_registered_even_without_own_block() {
        let table = parse("Norma\nUse: Legislação\nSituação: Ativo\n");
        assert_eq!(table.resolve("legislação"), Some("Legislação"));
    }

    #[test]
    fn test_aliases_with_redirect_resolve_to_target() {
        let table = parse("Norma\nUse: Legislação\nUsado por: regra\nSituação: Ativo\n");
        assert_eq!(table.resolve("regra"), Some("Legislação"));
    }

    #[test]
    fn test_parse_is_idempotent() {
        let first = parse(SAMPLE);
        let second = parse(SAMPLE);
        assert_eq!(first.phrasings(), second.phrasings());
        for key in first.phrasings() {
            assert_eq!(first.resolve_normalized(&key), second.resolve_normalized(&key));
        }
    }

    #[test]
    fn test_malformed_block_skipped_not_fatal() {
        let raw = "Def.: órfã sem rótulo\nSituação: Ativo\nPeculato\nSituação: Ativo\n";
        let table = parse(raw);
        assert_eq!(table.resolve("peculato"), Some("Peculato"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_empty_source_yields_empty_table() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn test_missing_file_is_source_not_found() {
        let err = parse_file("/nonexistent/tesauro.txt").unwrap_err();
        assert!(matches!(err, TesauroError::SourceNotFound(_)));
    }
}
