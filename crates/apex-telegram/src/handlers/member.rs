use apex_core::{
    domain::{ChatId, UserId},
    messaging::types::MemberJoined,
};
use teloxide::types::{ChatMemberKind, ChatMemberUpdated};

/// New status counts as having joined.
pub(crate) fn is_join(kind: &ChatMemberKind) -> bool {
    matches!(kind, ChatMemberKind::Member | ChatMemberKind::Restricted(_))
}

pub(crate) fn to_member_joined(upd: &ChatMemberUpdated) -> Option<MemberJoined> {
    if !is_join(&upd.new_chat_member.kind) {
        return None;
    }
    let user = &upd.new_chat_member.user;
    Some(MemberJoined {
        chat_id: ChatId(upd.chat.id.0),
        user_id: UserId(user.id.0 as i64),
        first_name: user.first_name.clone(),
        is_bot: user.is_bot,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_member_statuses_count_as_join() {
        assert!(is_join(&ChatMemberKind::Member));
        assert!(!is_join(&ChatMemberKind::Left));
    }
}
