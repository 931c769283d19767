use std::io::Cursor;
use student_records::{Session, Settings, Shell};

fn run_script(script: &str) -> (Shell, String) {
    let mut shell = Shell::with_session(Session::new(Settings {
        top_count: 3,
        banner: false,
    }));
    let mut out = Vec::new();
    shell
        .run_script(&mut Cursor::new(script.as_bytes().to_vec()), &mut out)
        .unwrap();
    (shell, String::from_utf8(out).unwrap())
}

#[test]
fn test_full_session() {
    let script = "\
add S001 \"Budi Santoso\" 10A
add S002 Ani 10B
add S003 Citra 11A
add S002 Dedi 12C
grade S001 Math 80
grade S001 Science 90
grade S002 Math 70
grade S003 Math 95
grade S003 Math 100.5
update S002 --class 11B
remove S003
y
top
exit
";
    let (shell, out) = run_script(script);
    let students = &shell.session().students;

    assert_eq!(students.len(), 2);
    assert!(students.find("S003").is_none());

    let ani = students.find("S002").unwrap();
    assert_eq!(ani.name(), "Ani");
    assert_eq!(ani.class(), "11B");

    let budi = students.find("S001").unwrap();
    assert_eq!(budi.average(), 85.0);

    assert!(out.contains("Failed: student with ID \"S002\" is already registered."));
    assert!(out.contains("Invalid grade: score 100.5 is outside the range 0-100."));
    assert!(out.contains("Student removed."));

    let rank1 = out.find("Rank 1:\nID      : S001").unwrap();
    let rank2 = out.find("Rank 2:\nID      : S002").unwrap();
    assert!(rank1 < rank2);
    assert!(out.contains("Average : 85.00"));
}

#[test]
fn test_cancelled_removal_keeps_student() {
    let (shell, out) = run_script("add S001 Budi 10A\nremove S001\nno\nlist\n");
    assert_eq!(shell.session().students.len(), 1);
    assert!(out.contains("Removal cancelled."));
    assert!(out.ends_with("Average : 0.00\n"));
}

#[test]
fn test_lookups_on_missing_ids() {
    let (shell, out) = run_script(
        "find S404\nupdate S404 --name X\nremove S404 -y\ngrade S404 Math 50\nlist\n",
    );
    assert!(shell.session().students.is_empty());
    assert_eq!(out.matches("Student with ID \"S404\" not found.").count(), 4);
    assert!(out.ends_with("No students yet.\n"));
}

#[test]
fn test_top_keeps_insertion_order_for_ties() {
    let script = "\
add 1 A 10A
add 2 B 10A
add 3 C 10A
add 4 D 10A
add 5 E 10A
grade 1 Math 90
grade 2 Math 70
grade 3 Math 90
grade 4 Math 60
grade 5 Math 80
";
    let (shell, _) = run_script(script);
    let ids: Vec<&str> = shell
        .session()
        .students
        .top(3)
        .iter()
        .map(|s| s.id())
        .collect();
    assert_eq!(ids, vec!["1", "3", "5"]);
}

#[test]
fn test_bad_arguments_are_reported_and_session_continues() {
    let (shell, out) = run_script("add S001\ngrade S001 Math lots\nadd S001 Budi 10A\n");
    assert_eq!(shell.session().students.len(), 1);
    assert!(out.ends_with("Student added.\n"));
    assert!(out.len() > "Student added.\n".len());
    assert_eq!(out.matches("Student added.").count(), 1);
}

#[test]
fn test_negative_score_is_rejected_as_out_of_range() {
    let (shell, out) = run_script("add S1 A 10A\ngrade S1 Math -5\ngrade S1 Math -0.5\n");
    assert_eq!(
        out,
        "Student added.\n\
         Invalid grade: score -5 is outside the range 0-100.\n\
         Invalid grade: score -0.5 is outside the range 0-100.\n"
    );
    assert!(shell.session().students.find("S1").unwrap().grades().is_empty());
}

#[test]
fn test_garbled_line_does_not_end_session() {
    let mut shell = Shell::with_session(Session::new(Settings::default()));
    let mut out = Vec::new();
    shell
        .run_script(
            &mut Cursor::new(b"add S1 A 10A\nfind \xff\xfe\nadd S2 B 10B\nlist\n".to_vec()),
            &mut out,
        )
        .unwrap();
    assert_eq!(shell.session().students.len(), 2);
    assert!(String::from_utf8(out).unwrap().ends_with("Average : 0.00\n"));
}
