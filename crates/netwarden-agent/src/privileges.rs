//! One-shot privilege reduction after privileged startup work is done.

use anyhow::{bail, Context, Result};
use nix::unistd::{setgid, setgroups, setuid, Gid, Group, Uid, User};
use tracing::info;

/// Switch to an unprivileged user and group.
///
/// No-op when not running as root. Order matters: the supplementary group
/// list and gid must change while we still hold root, and the uid switch
/// comes last. After switching, regaining root must fail or the drop is
/// treated as an error.
pub fn drop_privileges(user: &str, group: &str) -> Result<()> {
    if !Uid::effective().is_root() {
        info!("already running unprivileged, keeping current account");
        return Ok(());
    }

    let user_entry = User::from_name(user)
        .with_context(|| format!("looking up user {user}"))?
        .with_context(|| format!("no such user: {user}"))?;
    let group_entry = Group::from_name(group)
        .with_context(|| format!("looking up group {group}"))?
        .with_context(|| format!("no such group: {group}"))?;

    apply_ids(user_entry.uid, group_entry.gid)?;

    info!(user, group, "dropped privileges");
    Ok(())
}

fn apply_ids(uid: Uid, gid: Gid) -> Result<()> {
    setgroups(&[gid]).context("clearing supplementary groups")?;
    setgid(gid).context("switching group")?;
    setuid(uid).context("switching user")?;

    if setuid(Uid::from_raw(0)).is_ok() {
        bail!("privilege drop did not stick: process can regain root");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unprivileged_process_is_a_no_op() {
        // CI and developer machines never run tests as root, so this takes
        // the early-return path regardless of the account names.
        if !Uid::effective().is_root() {
            assert!(drop_privileges("nobody", "nogroup").is_ok());
        }
    }
}
