//! Rewrites Velocity-style references into `MiniJinja` expressions.
//!
//! Comment templates traditionally use `$field`, `${field}` and the quiet
//! forms `$!field` / `$!{field}`. In plain text each reference becomes
//! `{{ field }}`; inside a `{{ ... }}` or `{% ... %}` tag it becomes the bare
//! variable name, so `{% if $field %}` reads as `{% if field %}`. Dotted
//! paths such as `$field.name` are kept as attribute access. A backslash
//! before a reference in text (`\$field`) emits the reference literally. A
//! `$` that does not start a reference is left as is, and `{# ... #}`
//! comments are copied untouched.

/// A reference found at some position of the template.
struct Reference {
    path: String,
    end: usize,
}

/// Where the scanner currently is.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Region {
    Text,
    /// Inside a tag closed by `close` followed by `}`.
    Tag { close: char },
}

/// Converts every `$` reference in `template` to `MiniJinja` syntax.
pub(super) fn translate_references(template: &str) -> String {
    let chars: Vec<char> = template.chars().collect();
    let mut translated = String::with_capacity(template.len());
    let mut region = Region::Text;
    let mut index = 0;

    while let Some(&current) = chars.get(index) {
        let next = index.saturating_add(1);
        let following = chars.get(next).copied();
        match (region, current, following) {
            (Region::Text, '{', Some(opener @ ('{' | '%' | '#'))) => {
                translated.push(current);
                translated.push(opener);
                region = Region::Tag {
                    close: if opener == '{' { '}' } else { opener },
                };
                index = next.saturating_add(1);
            }
            (Region::Tag { close }, _, Some('}')) if current == close => {
                translated.push(current);
                translated.push('}');
                region = Region::Text;
                index = next.saturating_add(1);
            }
            (Region::Tag { close: '#' }, _, _) => {
                translated.push(current);
                index = next;
            }
            (_, '$', _) => {
                index = push_reference(&chars, index, region, &mut translated);
            }
            (Region::Text, '\\', Some('$')) => {
                if let Some(reference) = parse_reference(&chars, next) {
                    translated.extend(chars.get(next..reference.end).unwrap_or_default());
                    index = reference.end;
                } else {
                    translated.push(current);
                    index = next;
                }
            }
            _ => {
                translated.push(current);
                index = next;
            }
        }
    }

    translated
}

/// Writes the reference starting at `start` in the form `region` needs and
/// returns the index after it. A `$` that starts no reference is copied.
fn push_reference(chars: &[char], start: usize, region: Region, translated: &mut String) -> usize {
    let Some(reference) = parse_reference(chars, start) else {
        translated.push('$');
        return start.saturating_add(1);
    };
    match region {
        Region::Text => {
            translated.push_str("{{ ");
            translated.push_str(&reference.path);
            translated.push_str(" }}");
        }
        Region::Tag { .. } => translated.push_str(&reference.path),
    }
    reference.end
}

/// Parses a reference whose `$` sits at `start`.
fn parse_reference(chars: &[char], start: usize) -> Option<Reference> {
    let mut index = start.saturating_add(1);
    if chars.get(index) == Some(&'!') {
        index = index.saturating_add(1);
    }
    let braced = chars.get(index) == Some(&'{');
    if braced {
        index = index.saturating_add(1);
    }

    let (mut path, mut end) = read_identifier(chars, index)?;
    while chars.get(end) == Some(&'.') {
        let Some((segment, segment_end)) = read_identifier(chars, end.saturating_add(1)) else {
            break;
        };
        path.push('.');
        path.push_str(&segment);
        end = segment_end;
    }

    if braced {
        if chars.get(end) != Some(&'}') {
            return None;
        }
        end = end.saturating_add(1);
    }

    Some(Reference { path, end })
}

fn read_identifier(chars: &[char], start: usize) -> Option<(String, usize)> {
    let first = chars.get(start).filter(|first| first.is_ascii_alphabetic())?;
    let mut identifier = String::from(*first);
    let mut index = start.saturating_add(1);

    while let Some(&next) = chars
        .get(index)
        .filter(|next| next.is_ascii_alphanumeric() || **next == '_')
    {
        identifier.push(next);
        index = index.saturating_add(1);
    }

    Some((identifier, index))
}
