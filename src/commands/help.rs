// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::dispatcher::Reply;

const HELP: &str = "Available commands:
- /start: Starts the bot
- /help: Shows this help message
- /expense: Adds a new expense
- /old_expense: Adds an expense with a date (dd.mm.yyyy) at the end
- /expense_help: Shows help for the expense command
- /delete_last_expense: Deletes the last expense
- /today_expenses: Shows today's expenses
- /weekly_expenses: Sends this week's expenses as a file
- /monthly_expenses [month] [year]: Sends a month's expenses as a file
- /shared_expenses [month] [year]: Shows a month's shared expenses
- /monthly_report <month> <year>: Generates a monthly report
- /yearly_report <year>: Generates a yearly report";

const EXPENSE_HELP: &str = "Pattern for expenses - /expense <category> <name> <shared> <amount>
- Available categories:
   food, cosmetics, hc (house cleaning), eo (eating out), cravings, alcohol
- Shared:
   yes or no
- Old expenses take a date at the end: /old_expense food milk yes 10 01.01.2022";

pub fn start() -> Reply {
    Reply::text("Hello! Thanks for using spendbot. Type /help to see what I can do.")
}

pub fn help() -> Reply {
    Reply::text(HELP)
}

pub fn expense_help() -> Reply {
    Reply::text(EXPENSE_HELP)
}
