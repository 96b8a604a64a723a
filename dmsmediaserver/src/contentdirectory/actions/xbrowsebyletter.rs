//! `X_BrowseByLetter` (extension Samsung).
//!
//! Le saut alphabétique n'est pas implémenté : l'action se comporte
//! exactement comme un Search avec les mêmes arguments (voir
//! [`search`](super::search)).

define_action! {
    pub static X_BROWSEBYLETTER = "X_BrowseByLetter" as BrowseByLetter {
        in "ContainerID",
        opt "SearchCriteria",
        opt "Filter",
        opt "StartingIndex",
        opt "RequestedCount",
        opt "SortCriteria",
        out "Result",
        out "NumberReturned",
        out "TotalMatches",
        out "UpdateID",
    }
}
