//! Server-rendered directory page: the employee table and the CRUD form.

use products_hr::{Action, Employee, EmployeeForm};

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 2rem; }
table { border-collapse: collapse; margin-bottom: 1.5rem; }
th, td { border: 1px solid #ccc; padding: 0.4rem 0.8rem; text-align: left; }
.form-container form { display: grid; grid-template-columns: max-content 16rem; gap: 0.4rem 0.8rem; }
.buttons { grid-column: 1 / 3; display: flex; gap: 0.5rem; }
.alert { border: 1px solid #c33; background: #fee; padding: 0.5rem 1rem; }
"#;

const FIELDS: [(&str, &str); 5] = [
    ("employeeId", "Employee ID"),
    ("name", "Name"),
    ("position", "Position"),
    ("department", "Department"),
    ("contact", "Contact"),
];

const BUTTONS: [(Action, &str); 4] = [
    (Action::Create, "Create"),
    (Action::Read, "Read"),
    (Action::Update, "Update"),
    (Action::Delete, "Delete"),
];

pub fn render(form: &EmployeeForm, employees: &[Employee], alert: Option<&str>) -> String {
    let mut html = String::with_capacity(2048);
    html.push_str("<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Employee Directory</title>\n<style>");
    html.push_str(STYLE);
    html.push_str("</style>\n</head>\n<body>\n<div class=\"employee-directory\">\n");
    html.push_str("<h1>Employee Directory</h1>\n");

    if let Some(message) = alert {
        html.push_str(&format!(
            "<p class=\"alert\" role=\"alert\">{}</p>\n",
            escape(message)
        ));
    }

    html.push_str("<table>\n<thead>\n<tr>");
    for heading in ["ID", "Name", "Position", "Department", "Contact"] {
        html.push_str(&format!("<th>{heading}</th>"));
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");
    for employee in employees {
        html.push_str("<tr>");
        for cell in [
            &employee.key,
            &employee.name,
            &employee.position,
            &employee.department,
            &employee.contact,
        ] {
            html.push_str(&format!("<td>{}</td>", escape(cell)));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>\n");

    html.push_str("<div class=\"form-container\">\n<form method=\"post\">\n");
    let values = [
        &form.employee_id,
        &form.name,
        &form.position,
        &form.department,
        &form.contact,
    ];
    for ((name, label), value) in FIELDS.iter().zip(values) {
        html.push_str(&format!(
            "<label for=\"{name}\">{label}:</label>\n<input type=\"text\" id=\"{name}\" name=\"{name}\" value=\"{}\">\n",
            escape(value)
        ));
    }
    html.push_str("<div class=\"buttons\">\n");
    for (action, label) in BUTTONS {
        html.push_str(&format!(
            "<button type=\"submit\" formaction=\"/employees/{action}\">{label}</button>\n"
        ));
    }
    html.push_str("</div>\n</form>\n</div>\n</div>\n</body>\n</html>\n");
    html
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
