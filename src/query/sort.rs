//! Sorting stage of the query pipeline.
//!
//! Orders a book collection by a whitelisted field key with book id
//! ascending as the deterministic tie-break in both directions. Unknown
//! keys are a no-op and leave the input order untouched.
//!
//! Absent values (`None` keys) sort first ascending and last descending,
//! following `Option`'s natural ordering; the same rule holds for books
//! without an author under the `author` key.

use crate::models::BookSnapshot;

/// Sort the collection in place. Returns `true` when `key` is a recognized
/// field and an order was applied, `false` for the no-op case.
pub fn apply(books: &mut Vec<BookSnapshot>, key: &str, desc: bool) -> bool {
    match key {
        "title" => sort_by_key(books, desc, |b| b.title.to_lowercase()),
        "author" => sort_by_key(books, desc, |b| {
            b.author.as_ref().map(|a| a.name.to_lowercase())
        }),
        "dateAdded" => sort_by_key(books, desc, |b| b.date_added),
        "borrowerName" => {
            restrict_to_unambiguous(books);
            sort_by_key(books, desc, |b| {
                b.active_borrow().map(|br| br.borrower_name.to_lowercase())
            });
        }
        "borrowDate" => {
            restrict_to_unambiguous(books);
            sort_by_key(books, desc, |b| b.active_borrow().map(|br| br.borrowed_date));
        }
        "returnDate" => {
            restrict_to_unambiguous(books);
            sort_by_key(books, desc, |b| {
                b.active_borrow().and_then(|br| br.returned_date)
            });
        }
        _ => return false,
    }

    super::dedup_by_id(books);
    true
}

/// For borrow-backed sort keys, a returned historical row must not decide
/// order: keep only books with no borrow rows or with an active borrow.
fn restrict_to_unambiguous(books: &mut Vec<BookSnapshot>) {
    books.retain(|b| b.borrows.is_empty() || b.active_borrow().is_some());
}

fn sort_by_key<K: Ord>(
    books: &mut [BookSnapshot],
    desc: bool,
    key: impl Fn(&BookSnapshot) -> K,
) {
    books.sort_by(|a, b| {
        let ord = key(a).cmp(&key(b));
        let ord = if desc { ord.reverse() } else { ord };
        // Secondary key: id ascending, regardless of direction
        ord.then(a.id.cmp(&b.id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::fixtures::{active_borrow, author, book, catalog, ids, returned_borrow};

    #[test]
    fn sort_by_title() {
        let mut books = catalog();
        assert!(apply(&mut books, "title", false));
        // Alpha Book, Beta Book, Delta Quest, Gamma Story
        assert_eq!(ids(&books), vec![1, 2, 4, 3]);

        let mut books = catalog();
        assert!(apply(&mut books, "title", true));
        assert_eq!(ids(&books), vec![3, 4, 2, 1]);
    }

    #[test]
    fn title_sort_is_case_insensitive() {
        let mut books = vec![
            book(1, "zebra", None, vec![], 0),
            book(2, "Apple", None, vec![], 0),
        ];
        apply(&mut books, "title", false);
        assert_eq!(ids(&books), vec![2, 1]);
    }

    #[test]
    fn sort_by_author_nulls_first_ascending() {
        let mut books = catalog();
        assert!(apply(&mut books, "author", false));
        // Book 4 has no author and sorts first; then Author One (ids 1, 3),
        // then Author Two.
        assert_eq!(ids(&books), vec![4, 1, 3, 2]);

        let mut books = catalog();
        assert!(apply(&mut books, "author", true));
        assert_eq!(ids(&books), vec![2, 1, 3, 4]);
    }

    #[test]
    fn sort_by_date_added() {
        let mut books = catalog();
        assert!(apply(&mut books, "dateAdded", false));
        // Oldest first: book1 (10 days ago) ... book4 (today)
        assert_eq!(ids(&books), vec![1, 2, 3, 4]);

        let mut books = catalog();
        assert!(apply(&mut books, "dateAdded", true));
        assert_eq!(ids(&books), vec![4, 3, 2, 1]);
    }

    #[test]
    fn unknown_key_is_a_noop() {
        let mut books = catalog();
        books.reverse();
        let before = ids(&books);
        assert!(!apply(&mut books, "invalid_field", false));
        assert_eq!(ids(&books), before);
    }

    #[test]
    fn tie_break_is_id_ascending_in_both_directions() {
        let mut books = vec![
            book(3, "Same Title", None, vec![], 0),
            book(1, "Same Title", None, vec![], 0),
            book(2, "Same Title", None, vec![], 0),
        ];
        apply(&mut books, "title", false);
        assert_eq!(ids(&books), vec![1, 2, 3]);

        apply(&mut books, "title", true);
        assert_eq!(ids(&books), vec![1, 2, 3]);
    }

    #[test]
    fn ascending_and_descending_are_reversals_modulo_ties() {
        let mut asc = catalog();
        apply(&mut asc, "title", false);
        let mut desc = catalog();
        apply(&mut desc, "title", true);
        let mut reversed = ids(&desc);
        reversed.reverse();
        assert_eq!(ids(&asc), reversed);
    }

    #[test]
    fn borrower_sort_drops_books_with_only_returned_history() {
        let mut books = catalog();
        assert!(apply(&mut books, "borrowerName", false));
        // Book 3 only has a returned borrow row and is excluded; books
        // without any borrow row sort before the active borrower.
        assert_eq!(ids(&books), vec![2, 4, 1]);
    }

    #[test]
    fn borrow_date_sort_uses_active_row() {
        let mut a = book(1, "A", Some(author(1, "One")), vec![], 0);
        a.borrows.push(active_borrow(1, 1, "Early"));
        a.borrows[0].borrowed_date = crate::query::fixtures::base_date()
            - chrono::Duration::days(2);
        let mut b = book(2, "B", None, vec![], 0);
        b.borrows.push(active_borrow(2, 2, "Late"));
        let mut c = book(3, "C", None, vec![], 0);
        c.borrows.push(returned_borrow(3, 3, "Gone"));

        let mut books = vec![b, c, a];
        assert!(apply(&mut books, "borrowDate", false));
        // c is excluded; a's borrow predates b's.
        assert_eq!(ids(&books), vec![1, 2]);
    }
}
