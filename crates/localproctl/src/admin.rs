use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use std::io::{self, BufRead, Write};
use tokio::sync::mpsc;

use localpro_core::{
    AdminConsole, LocalProConfig, NoticeLevel, Notification, ProviderFields, ProviderRecord,
};

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List electricians, most recent first
    List {
        /// Filter by name, area or service
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show one electrician
    Show { id: i64 },
    /// Add a new electrician
    Add(FieldArgs),
    /// Edit an existing electrician
    Edit {
        id: i64,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Delete an electrician
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Form fields; omitted fields keep their current value
#[derive(Args, Debug, Clone, Default)]
pub struct FieldArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    service: Option<String>,
    #[arg(long)]
    city: Option<String>,
    #[arg(long)]
    area: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    whatsapp: Option<String>,
    /// Years of experience
    #[arg(long)]
    experience: Option<u32>,
    #[arg(long)]
    verified: Option<bool>,
    /// Photo URL; empty uses a generated avatar
    #[arg(long)]
    photo: Option<String>,
    #[arg(long)]
    description: Option<String>,
}

impl FieldArgs {
    fn apply(&self, fields: &mut ProviderFields) {
        let strings = [
            (&self.name, &mut fields.name),
            (&self.service, &mut fields.service),
            (&self.city, &mut fields.city),
            (&self.area, &mut fields.area),
            (&self.phone, &mut fields.phone),
            (&self.whatsapp, &mut fields.whatsapp),
            (&self.photo, &mut fields.photo),
            (&self.description, &mut fields.description),
        ];
        for (arg, field) in strings {
            if let Some(value) = arg {
                *field = value.clone();
            }
        }
        if let Some(experience) = self.experience {
            fields.experience = experience;
        }
        if let Some(verified) = self.verified {
            fields.verified = verified;
        }
    }
}

pub async fn handle(config: &LocalProConfig, cmd: &Command) -> Result<()> {
    let store = crate::open_store(config).await?;
    let (mut console, mut notices) = AdminConsole::new(store, config);

    if let Err(e) = console.load().await {
        if let Some(message) = console.view().load_error {
            eprintln!("{}", message);
        }
        return Err(e.into());
    }

    match cmd {
        Command::List { search } => {
            if let Some(term) = search {
                console.set_search(term.as_str());
            }
            let view = console.view();
            println!("Electricians ({})", view.total);
            if let Some(message) = view.empty_message {
                println!("{}", message);
            }
            for record in view.records {
                println!(
                    "{:>15}  {:<24} {:<20} {}",
                    record.id,
                    record.name,
                    record.service,
                    record.area
                );
            }
        }
        Command::Show { id } => {
            let record = console
                .store()
                .find(*id)
                .with_context(|| format!("No electrician with id {}", id))?;
            print_record(record);
        }
        Command::Add(args) => {
            args.apply(console.form_mut());
            if let Some(record) = console.submit().await? {
                print_record(&record);
            }
        }
        Command::Edit { id, fields } => {
            if !console.begin_edit(*id) {
                anyhow::bail!("No electrician with id {}", id);
            }
            fields.apply(console.form_mut());
            if let Some(record) = console.submit().await? {
                print_record(&record);
            }
        }
        Command::Delete { id, yes } => {
            let name = console
                .select_delete(*id)
                .map(str::to_string)
                .with_context(|| format!("No electrician with id {}", id))?;

            if *yes || confirm(&format!("Delete {}?", name))? {
                console.confirm_delete().await?;
            } else {
                console.cancel_delete();
                println!("Cancelled");
            }
        }
    }

    drain_notifications(&mut notices);
    Ok(())
}

fn print_record(record: &ProviderRecord) {
    println!("{} ({})", record.name, record.id);
    println!("  Service:     {}", record.service);
    println!("  Location:    {}, {}", record.area, record.city);
    println!("  Phone:       {}", record.phone);
    println!("  WhatsApp:    {}", record.whatsapp);
    println!("  Experience:  {} years", record.experience);
    println!("  Verified:    {}", if record.verified { "yes" } else { "no" });
    println!("  Photo:       {}", record.photo);
    if !record.description.is_empty() {
        println!("  {}", record.description);
    }
}

/// Ask a yes/no question on the terminal; anything but "y" is a no
fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn drain_notifications(notices: &mut mpsc::Receiver<Notification>) {
    while let Ok(notice) = notices.try_recv() {
        match notice.level {
            NoticeLevel::Success => println!("{}", notice.message),
            NoticeLevel::Error => eprintln!("{}", notice.message),
        }
    }
}
