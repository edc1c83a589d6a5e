/// Converts a field identifier into the snake_case column name it is matched against.
///
/// `PublishedAt` becomes `published_at`, `ID` becomes `id`, `HTTPStatus` becomes
/// `http_status`. Identifiers that are already snake_case are returned unchanged,
/// and a leading `r#` from raw identifiers is dropped.
pub fn to_snake_case(ident: &str) -> String {
    let ident = ident.strip_prefix("r#").unwrap_or(ident);
    let chars: Vec<char> = ident.chars().collect();
    let mut out = String::with_capacity(ident.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev = i.checked_sub(1).map(|p| chars[p]);
            let next = chars.get(i + 1).copied();

            // a new word starts at `aB`, `1B` and at the last capital of `ABc`
            let starts_word = match prev {
                Some(p) if p == '_' => false,
                Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_uppercase() => next.is_some_and(|n| n.is_lowercase()),
                _ => false,
            };

            if starts_word {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::to_snake_case;

    #[test]
    fn test_camel_case_fields() {
        assert_eq!(to_snake_case("PublishedAt"), "published_at");
        assert_eq!(to_snake_case("NumberOfBooks"), "number_of_books");
        assert_eq!(to_snake_case("Title"), "title");
    }

    #[test]
    fn test_snake_case_is_unchanged() {
        assert_eq!(to_snake_case("published_at"), "published_at");
        assert_eq!(to_snake_case("id"), "id");
        assert_eq!(to_snake_case("created_at_2"), "created_at_2");
    }

    #[test]
    fn test_acronyms() {
        assert_eq!(to_snake_case("ID"), "id");
        assert_eq!(to_snake_case("UserID"), "user_id");
        assert_eq!(to_snake_case("HTTPStatus"), "http_status");
    }

    #[test]
    fn test_raw_identifier() {
        assert_eq!(to_snake_case("r#type"), "type");
    }

    #[test]
    fn test_mixed_case_does_not_normalize_to_other_columns() {
        // `published_On` is not the normalized form of `PublishedAt`
        assert_ne!(to_snake_case("PublishedAt"), "published_On");
        assert_eq!(to_snake_case("published_On"), "published_on");
    }
}
