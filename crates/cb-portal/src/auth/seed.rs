//! Development Directory Seeder
//!
//! Seeds the in-memory principal directory with one account per portal area.
//!
//! Default credentials:
//!   Super Admin: superadmin / superadmin
//!   Admin:       grace / DevPassword123!
//!   Manager:     max / DevPassword123!
//!   Carer:       ada / DevPassword123!
//!   Client:      cleo / DevPassword123!

use cb_common::{Identity, Role};
use tracing::info;

use crate::auth::directory::{MemoryDirectory, PrincipalRecord};
use crate::guard::LoginArea;

const DEV_PASSWORD: &str = "DevPassword123!";

/// Build the seeded development directory.
pub fn seeded_directory() -> MemoryDirectory {
    let mut directory = MemoryDirectory::new();

    // The fixed super-admin account the portal ships with
    directory.insert(
        LoginArea::Superadmin,
        "superadmin",
        PrincipalRecord::new(
            Identity::new("Super Admin", "superadmins/superadmin"),
            Role::Superadmin,
            "superadmin",
        ),
    );

    directory.insert(
        LoginArea::Admin,
        "grace",
        PrincipalRecord::new(
            Identity::new("Grace Okafor", "admins/grace").with_contact("grace@carebridge.local"),
            Role::Admin,
            DEV_PASSWORD,
        ),
    );
    directory.insert(
        LoginArea::Admin,
        "max",
        PrincipalRecord::new(
            Identity::new("Max Reid", "admins/max").with_contact("max@carebridge.local"),
            Role::Manager,
            DEV_PASSWORD,
        ),
    );

    directory.insert(
        LoginArea::Carer,
        "ada",
        PrincipalRecord::new(
            Identity::new("Ada Mensah", "carers/ada").with_contact("ada@carebridge.local"),
            Role::Caretaker,
            DEV_PASSWORD,
        ),
    );

    directory.insert(
        LoginArea::Client,
        "cleo",
        PrincipalRecord::new(
            Identity::new("Cleo Hart", "clients/cleo").with_contact("cleo@carebridge.local"),
            Role::Client,
            DEV_PASSWORD,
        ),
    );

    info!("Seeded development directory");
    info!("Default logins:");
    info!("  Super Admin: superadmin / superadmin");
    info!("  Admin:       grace / {}", DEV_PASSWORD);
    info!("  Manager:     max / {}", DEV_PASSWORD);
    info!("  Carer:       ada / {}", DEV_PASSWORD);
    info!("  Client:      cleo / {}", DEV_PASSWORD);

    directory
}
