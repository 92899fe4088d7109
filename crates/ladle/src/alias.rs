//! Short-name expansion for field paths.
//!
//! API payloads in this domain use long snake_case member names
//! (`properties`, `rich_text`, `plain_text`, ...). Query and path
//! expressions accept compact aliases for them; every expression entry
//! point canonicalizes through this module before parsing, so the rest
//! of the pipeline only ever sees canonical names.
//!
//! All operations here are idempotent: canonical names map to
//! themselves, so expanding an already-expanded expression is a no-op.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

/// Canonical member name paired with the aliases that expand to it.
const ALIAS_PAIRS: &[(&str, &[&str])] = &[
    ("annotations", &["ann"]),
    ("archived", &["arch"]),
    ("block_id", &["blk"]),
    ("bookmark", &["bmk"]),
    ("bulleted_list_item", &["bullet", "bli"]),
    ("caption", &["cap"]),
    ("checkbox", &["check", "cbx"]),
    ("child_database", &["cdb"]),
    ("child_page", &["cpg"]),
    ("children", &["ch"]),
    ("color", &["clr"]),
    ("content", &["cont"]),
    ("cover", &["cov"]),
    ("created_by", &["cb"]),
    ("created_time", &["ct"]),
    ("database_id", &["db", "dbid"]),
    ("date", &["dt"]),
    ("description", &["desc"]),
    ("divider", &["div"]),
    ("email", &["em"]),
    ("emoji", &["emj"]),
    ("equation", &["eqn"]),
    ("expression", &["expr"]),
    ("external", &["ext"]),
    ("formula", &["fx"]),
    ("has_children", &["hc"]),
    ("has_more", &["hm", "more"]),
    ("heading_1", &["h1"]),
    ("heading_2", &["h2"]),
    ("heading_3", &["h3"]),
    ("icon", &["ico"]),
    ("in_trash", &["trash"]),
    ("is_inline", &["inline"]),
    ("language", &["lang"]),
    ("last_edited_by", &["leb"]),
    ("last_edited_time", &["let", "lt"]),
    ("link_preview", &["lp"]),
    ("multi_select", &["ms"]),
    ("next_cursor", &["nc", "cursor"]),
    ("number", &["num"]),
    ("numbered_list_item", &["nli"]),
    ("object", &["obj"]),
    ("page_id", &["pg", "pgid"]),
    ("paragraph", &["para"]),
    ("parent", &["par"]),
    ("people", &["ppl"]),
    ("phone_number", &["phone", "pn"]),
    ("plain_text", &["pt", "p"]),
    ("properties", &["props", "pr"]),
    ("public_url", &["purl"]),
    ("relation", &["rel"]),
    ("request_id", &["rid"]),
    ("results", &["res"]),
    ("rich_text", &["rt"]),
    ("rollup", &["roll"]),
    ("select", &["sel"]),
    ("status", &["stat"]),
    ("strikethrough", &["strike"]),
    ("synced_block", &["sync"]),
    ("table_of_contents", &["toc"]),
    ("table_row", &["trow"]),
    ("time_zone", &["tz"]),
    ("title", &["ttl"]),
    ("to_do", &["todo"]),
    ("toggle", &["tgl"]),
    ("underline", &["ul"]),
    ("unique_id", &["uid"]),
    ("verification", &["verif"]),
    ("workspace", &["ws"]),
];

/// Alias-to-canonical lookup, validated once at startup.
#[derive(Debug)]
struct AliasTable {
    by_alias: HashMap<&'static str, &'static str>,
}

impl AliasTable {
    /// Build the lookup, rejecting tables where an alias shadows a
    /// canonical name or two canonical names claim the same alias.
    fn from_pairs(pairs: &[(&'static str, &[&'static str])]) -> Result<Self, String> {
        let canonical: HashSet<&str> = pairs.iter().map(|(name, _)| *name).collect();

        let mut by_alias = HashMap::new();
        for (name, aliases) in pairs {
            for alias in *aliases {
                if canonical.contains(alias) {
                    return Err(format!("alias `{alias}` shadows a canonical name"));
                }
                if let Some(previous) = by_alias.insert(*alias, *name) {
                    return Err(format!(
                        "alias `{alias}` maps to both `{previous}` and `{name}`"
                    ));
                }
            }
        }

        Ok(Self { by_alias })
    }

    fn resolve(&self, token: &str) -> Option<&'static str> {
        self.by_alias.get(token).copied()
    }
}

static TABLE: Lazy<AliasTable> =
    Lazy::new(|| AliasTable::from_pairs(ALIAS_PAIRS).expect("alias table is collision-free"));

/// Resolve a single bare token to its canonical name.
///
/// Tokens containing uppercase letters are passed through untouched;
/// aliases are all-lowercase, so mixed case signals a deliberate
/// member name.
pub fn canonicalize_token(token: &str) -> &str {
    if token.chars().any(|c| c.is_ascii_uppercase()) {
        return token;
    }
    match TABLE.resolve(token) {
        Some(canonical) => canonical,
        None => token,
    }
}

/// Expand aliases in `.identifier` field accesses throughout a query
/// expression.
///
/// Tokens inside string literals and `#` comments are left untouched,
/// as are bracket-quoted accesses like `.["props"]`.
pub fn expand_path_aliases(expression: &str) -> String {
    let mut out = String::with_capacity(expression.len());
    let mut chars = expression.chars().peekable();
    let mut in_double = false;
    let mut in_single = false;
    let mut in_comment = false;

    while let Some(c) = chars.next() {
        if in_comment {
            out.push(c);
            if c == '\n' {
                in_comment = false;
            }
            continue;
        }
        if in_double || in_single {
            out.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' if in_double => in_double = false,
                '\'' if in_single => in_single = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => {
                in_double = true;
                out.push(c);
            }
            '\'' => {
                in_single = true;
                out.push(c);
            }
            '#' => {
                in_comment = true;
                out.push(c);
            }
            '.' if chars.peek().is_some_and(|&next| is_ident_start(next)) => {
                let mut token = String::new();
                while let Some(&next) = chars.peek() {
                    if !is_ident_char(next) {
                        break;
                    }
                    token.push(next);
                    chars.next();
                }
                out.push('.');
                out.push_str(canonicalize_token(&token));
            }
            _ => out.push(c),
        }
    }

    out
}

/// Rewrite `\!` to `!` outside string literals and comments.
///
/// Some shells keep history expansion live inside double quotes, so
/// `!=` often arrives as `\!=`. jq has no `\!` token; strip the
/// backslash rather than fail. Returns the rewritten expression and
/// whether anything changed.
pub fn unescape_negation(expression: &str) -> (String, bool) {
    let mut out = String::with_capacity(expression.len());
    let mut chars = expression.chars().peekable();
    let mut in_double = false;
    let mut in_single = false;
    let mut in_comment = false;
    let mut changed = false;

    while let Some(c) = chars.next() {
        if in_comment {
            out.push(c);
            if c == '\n' {
                in_comment = false;
            }
            continue;
        }
        if in_double || in_single {
            out.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' if in_double => in_double = false,
                '\'' if in_single => in_single = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => {
                in_double = true;
                out.push(c);
            }
            '\'' => {
                in_single = true;
                out.push(c);
            }
            '#' => {
                in_comment = true;
                out.push(c);
            }
            '\\' if chars.peek() == Some(&'!') => {
                chars.next();
                out.push('!');
                changed = true;
            }
            _ => out.push(c),
        }
    }

    (out, changed)
}

/// Canonicalize each dot-separated segment of a sort path.
pub fn normalize_sort_path(path: &str) -> String {
    path.split('.')
        .map(|segment| {
            if segment.is_empty() {
                segment
            } else {
                canonicalize_token(segment)
            }
        })
        .collect::<Vec<_>>()
        .join(".")
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
