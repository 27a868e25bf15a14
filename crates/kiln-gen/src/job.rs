use std::path::{Path, PathBuf};

/// One `FILE[,OUTPUT]` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl Job {
    /// Without an explicit output, write `<file name>.g.rs` to the working
    /// directory.
    pub fn parse(arg: &str) -> Self {
        match arg.split_once(',') {
            Some((input, output)) if !output.trim().is_empty() => Self {
                input: PathBuf::from(input.trim()),
                output: PathBuf::from(output.trim()),
            },
            Some((input, _)) => Self::with_default_output(input.trim()),
            None => Self::with_default_output(arg.trim()),
        }
    }

    fn with_default_output(input: &str) -> Self {
        let input = PathBuf::from(input);
        let file_name = input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "markup".to_string());
        let output = Path::new(&format!("{file_name}.g.rs")).to_path_buf();
        Self { input, output }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_output() {
        let job = Job::parse("ui/page.xaml, out/page.rs");
        assert_eq!(job.input, PathBuf::from("ui/page.xaml"));
        assert_eq!(job.output, PathBuf::from("out/page.rs"));
    }

    #[test]
    fn default_output_lands_in_working_directory() {
        assert_eq!(Job::parse("ui/page.xaml").output, PathBuf::from("page.xaml.g.rs"));
        assert_eq!(Job::parse("ui/page.xaml,").output, PathBuf::from("page.xaml.g.rs"));
    }
}
