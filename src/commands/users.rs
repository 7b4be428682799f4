// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::User;
use crate::store::Store;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let username = sub.get_one::<String>("username").unwrap().trim();
            let email = sub.get_one::<String>("email").unwrap().trim();
            store.add_user(User::new(username, email))?;
            println!("Added user '{}' <{}> (inactive)", username, email);
        }
        Some(("list", sub)) => {
            let users = store.users()?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &users)? {
                let current = store.settings()?.current_user;
                let rows = users
                    .into_iter()
                    .map(|u| {
                        let marker = if current.as_deref() == Some(u.email.as_str()) {
                            "*"
                        } else {
                            ""
                        };
                        vec![u.username, u.email, u.active.to_string(), marker.to_string()]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Username", "Email", "Active", "Current"], rows)
                );
            }
        }
        Some(("set-active", sub)) => {
            let email = sub.get_one::<String>("email").unwrap().trim();
            let active = *sub.get_one::<bool>("active").unwrap();
            store.set_user_active(email, active)?;
            println!("User {} active: {}", email, active);
        }
        Some(("switch", sub)) => {
            let email = sub.get_one::<String>("email").unwrap().trim();
            let user = store.switch_user(email)?;
            println!("Current user is now '{}' <{}>", user.username, user.email);
        }
        Some(("whoami", sub)) => {
            let email = store.current_user(sub.get_one::<String>("user").map(String::as_str))?;
            println!("{}", email);
        }
        _ => {}
    }
    Ok(())
}
