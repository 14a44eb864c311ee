/// Rules for telling external channels from internal ones.
pub struct Classifier<'a> {
    pub external_prefix: &'a str,
    pub internal_domain: &'a str,
}

impl<'a> Classifier<'a> {
    /// A channel is external when its name carries the external prefix and
    /// some resolved member email lies outside the internal domain.
    ///
    /// A prefixed channel with no resolved emails at all counts as external.
    pub fn is_external<S: AsRef<str>>(&self, channel_name: &str, member_emails: &[S]) -> bool {
        if !channel_name.starts_with(self.external_prefix) {
            return false;
        }
        member_emails.is_empty()
            || member_emails
                .iter()
                .any(|email| !email.as_ref().ends_with(self.internal_domain))
    }
}
